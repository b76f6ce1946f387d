//! GET /api/models - The static model catalog.

use axum::Json;

use palaver_types::model::{AVAILABLE_MODELS, ModelInfo};

pub async fn list_models() -> Json<&'static [ModelInfo]> {
    Json(AVAILABLE_MODELS)
}
