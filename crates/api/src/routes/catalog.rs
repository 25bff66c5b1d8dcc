//! # 数据目录路由控制器
//!
//! 对应看板侧边栏的公司选择器与日期选择器的数据源。

use axum::extract::State;
use axum::Json;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{CompaniesResponse, TimeRangeResponse};

/// 获取可查询的公司列表
///
/// 按 (公司, 代码) 去重，顺序为在数据表中首次出现的顺序。
#[utoipa::path(
    get,
    path = "/companies",
    tag = "目录 (Catalog)",
    responses(
        (status = 200, description = "公司列表", body = CompaniesResponse)
    )
)]
pub async fn get_companies(State(state): State<AppState>) -> Json<CompaniesResponse> {
    let companies = state
        .dataset
        .companies()
        .into_iter()
        .map(Into::into)
        .collect();
    Json(CompaniesResponse { companies })
}

/// 获取数据覆盖的日期范围与默认查询区间
#[utoipa::path(
    get,
    path = "/time-range",
    tag = "目录 (Catalog)",
    responses(
        (status = 200, description = "日期范围", body = TimeRangeResponse),
        (status = 404, description = "数据表为空", body = crate::types::ApiErrorResponse)
    )
)]
pub async fn get_time_range(
    State(state): State<AppState>,
) -> Result<Json<TimeRangeResponse>, ApiError> {
    let range = state.dataset.time_range()?;
    Ok(Json(range.into()))
}
