use axum::http::{header, HeaderName, HeaderValue, Method};
use log::*;
use service::config::{staff_id_header, ApiVersion};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::{Error, Result};
pub use service::AppState;

mod controller;
mod error;
mod extractors;
mod params;
mod router;

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let interface = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let server_url = format!("{interface}:{}", app_state.config.port);
    let listener = TcpListener::bind(&server_url).await?;

    let allowed_origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();
    info!("CORS allowed origins: {allowed_origins:?}");

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(ApiVersion::field_name()),
            HeaderName::from_static(staff_id_header()),
        ])
        .allow_origin(allowed_origins);

    info!("Server starting... listening for connections on http://{server_url}");

    let app = router::define_routes(app_state).layer(cors_layer);

    axum::serve(listener, app).await
}
