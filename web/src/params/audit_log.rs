use domain::Id;
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub(crate) struct IndexParams {
    /// e.g. `enrollment`
    pub(crate) entity_type: String,
    #[param(value_type = Uuid)]
    pub(crate) entity_id: Id,
}
