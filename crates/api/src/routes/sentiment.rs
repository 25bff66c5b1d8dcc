//! # 舆情路由控制器
//!
//! 单只股票情绪序列、跨公司热力图以及每日汇总。

use axum::extract::{Path, Query, State};
use axum::Json;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{
    ApiErrorResponse, DailyStatsResponse, DateRangeQuery, HeatmapResponse, SentimentResponse,
};

/// 获取单只股票的情绪序列
#[utoipa::path(
    get,
    path = "/sentiment/{symbol}",
    tag = "舆情 (Sentiment)",
    params(
        ("symbol" = String, Path, description = "股票代码，区分大小写"),
        DateRangeQuery
    ),
    responses(
        (status = 200, description = "情绪序列", body = SentimentResponse),
        (status = 404, description = "区间内无数据", body = ApiErrorResponse)
    )
)]
pub async fn get_sentiment(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<SentimentResponse>, ApiError> {
    let range = query.resolve(state.dataset.default_range());
    let series = state.dataset.sentiment(&symbol, &range)?;
    Ok(Json(series.into()))
}

/// 获取跨公司情绪热力图
///
/// 按 (日期, 公司名) 升序排列。
#[utoipa::path(
    get,
    path = "/heatmap",
    tag = "舆情 (Sentiment)",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "热力图格子", body = HeatmapResponse),
        (status = 404, description = "区间内无数据", body = ApiErrorResponse)
    )
)]
pub async fn get_heatmap(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<HeatmapResponse>, ApiError> {
    let range = query.resolve(state.dataset.default_range());
    let data = state
        .dataset
        .heatmap(&range)?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(HeatmapResponse { data }))
}

/// 获取每日汇总
///
/// 区间内无数据时返回空列表而不是 404。
// TODO: 与其它切片接口统一为 404，需要先确认看板前端对空列表的处理
#[utoipa::path(
    get,
    path = "/daily-stats",
    tag = "舆情 (Sentiment)",
    params(DateRangeQuery),
    responses(
        (status = 200, description = "每日汇总，可能为空", body = DailyStatsResponse)
    )
)]
pub async fn get_daily_stats(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Json<DailyStatsResponse> {
    let range = query.resolve(state.dataset.default_range());
    let data = state
        .dataset
        .daily_stats(&range)
        .into_iter()
        .map(Into::into)
        .collect();
    Json(DailyStatsResponse { data })
}
