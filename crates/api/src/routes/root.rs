use axum::Json;

use crate::types::MessageResponse;

/// 服务欢迎信息
#[utoipa::path(
    get,
    path = "/",
    tag = "通用 (General)",
    responses(
        (status = 200, description = "欢迎信息", body = MessageResponse)
    )
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to Stock Analysis API".to_string(),
    })
}
