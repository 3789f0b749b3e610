use crate::config::Config;
use log::LevelFilter;
use simplelog::{self, ConfigBuilder};

/// Dependencies whose log output is suppressed unless running at Trace level.
const FILTERED_MODULES: &[&str] = &[
    "sqlx",
    "sea_orm",
    "sea_orm_migration",
    "tower",
    "tower_http",
    "hyper",
    "axum",
];

pub struct Logger {}

impl Logger {
    /// Initializes the global terminal logger from the provided Config.
    ///
    /// Dependency logs are only shown when the level is Trace.
    pub fn init_logger(config: &Config) {
        let level = config.log_level_filter;

        simplelog::TermLogger::init(
            Self::convert_level_filter(level),
            Self::build_log_config(level),
            simplelog::TerminalMode::Mixed,
            simplelog::ColorChoice::Auto,
        )
        .expect("Failed to start simplelog");
    }

    fn convert_level_filter(level: LevelFilter) -> simplelog::LevelFilter {
        match level {
            LevelFilter::Off => simplelog::LevelFilter::Off,
            LevelFilter::Error => simplelog::LevelFilter::Error,
            LevelFilter::Warn => simplelog::LevelFilter::Warn,
            LevelFilter::Info => simplelog::LevelFilter::Info,
            LevelFilter::Debug => simplelog::LevelFilter::Debug,
            LevelFilter::Trace => simplelog::LevelFilter::Trace,
        }
    }

    /// Modules to silence for the given level.
    fn ignored_modules(level: LevelFilter) -> &'static [&'static str] {
        if level == LevelFilter::Trace {
            &[]
        } else {
            FILTERED_MODULES
        }
    }

    fn build_log_config(level: LevelFilter) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        for module in Self::ignored_modules(level) {
            builder.add_filter_ignore_str(module);
        }

        builder.build()
    }
}
