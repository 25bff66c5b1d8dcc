use axum::extract::{Path, Query, State};
use axum::Json;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiErrorResponse, DateRangeQuery, OhlcvResponse};

/// 获取单只股票的日线 OHLCV 序列
///
/// 结果按日期升序排列；区间内无数据 (包括未知代码或非法日期) 时返回 404。
#[utoipa::path(
    get,
    path = "/ohlcv/{symbol}",
    tag = "行情 (Market)",
    params(
        ("symbol" = String, Path, description = "股票代码，区分大小写"),
        DateRangeQuery
    ),
    responses(
        (status = 200, description = "OHLCV 序列", body = OhlcvResponse),
        (status = 404, description = "区间内无数据", body = ApiErrorResponse)
    )
)]
pub async fn get_ohlcv(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<OhlcvResponse>, ApiError> {
    let range = query.resolve(state.dataset.default_range());
    let series = state.dataset.ohlcv(&symbol, &range)?;
    Ok(Json(series.into()))
}
