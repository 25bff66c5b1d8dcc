use std::io::Write;
use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use stocksense_api::server::{build_router, AppState};
use stocksense_api::types::{
    CompaniesResponse, DailyStatsResponse, HeatmapResponse, OhlcvResponse, SentimentResponse,
    TimeRangeResponse,
};
use stocksense_core::common::DateRange;
use stocksense_store::table::InMemoryDataset;
use tokio::net::TcpListener;

const CSV: &str = "\
date,company,symbol,open,high,low,close,volume,avg_sentiment,article_count
2024-01-03,Tesla,TSLA,240.1,245.0,238.0,244.2,1200,0.1,2
2024-01-02,Tesla,TSLA,250.0,251.5,246.3,248.4,1500,0.2,3
2024-01-02,Apple,AAPL,187.1,188.4,183.9,185.6,8200,0.4,5
2024-01-03,Apple,AAPL,184.2,185.9,183.4,184.3,5800,0.0,0
2024-05-06,Apple,AAPL,182.4,184.2,180.4,181.7,7800,0.3,6
";

const HEADER_ONLY_CSV: &str =
    "date,company,symbol,open,high,low,close,volume,avg_sentiment,article_count\n";

// 帮助函数：以给定 CSV 内容在随机端口启动测试服务器
async fn spawn_test_server(csv: &str) -> (String, tempfile::NamedTempFile) {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(csv.as_bytes()).unwrap();

    let defaults = DateRange::parse("2024-01-01", "2024-06-12").unwrap();
    let dataset = InMemoryDataset::open(file.path(), defaults).expect("Failed to load dataset");
    let state = AppState {
        dataset: Arc::new(dataset),
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let addr = format!("http://127.0.0.1:{}", port);

    let app = build_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, file)
}

#[tokio::test]
async fn test_full_api_workflow() {
    let _ = tracing_subscriber::fmt().with_env_filter("debug").try_init();

    let (base_url, _file) = spawn_test_server(CSV).await;
    let client = reqwest::Client::new();

    // ============================================
    // Case 1: 欢迎信息
    // ============================================
    let res = client.get(format!("{}/", base_url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Welcome to Stock Analysis API");

    // ============================================
    // Case 2: 公司列表 (首次出现顺序)
    // ============================================
    let res = client
        .get(format!("{}/companies", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: CompaniesResponse = res.json().await.unwrap();
    let symbols: Vec<&str> = body.companies.iter().map(|c| c.symbol.as_str()).collect();
    assert_eq!(symbols, vec!["TSLA", "AAPL"]);

    // ============================================
    // Case 3: 日期范围
    // ============================================
    let res = client
        .get(format!("{}/time-range", base_url))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["start_date"], "2024-01-02");
    assert_eq!(body["end_date"], "2024-05-06");
    assert_eq!(body["default_start_date"], "2024-01-01");
    assert_eq!(body["default_end_date"], "2024-06-12");
    let typed: TimeRangeResponse = serde_json::from_value(body).unwrap();
    assert!(typed.start_date <= typed.end_date);

    // ============================================
    // Case 4: OHLCV 使用默认区间，按日期升序
    // ============================================
    let res = client
        .get(format!("{}/ohlcv/AAPL", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: OhlcvResponse = res.json().await.unwrap();
    assert_eq!(body.company, "Apple");
    assert_eq!(body.symbol, "AAPL");
    assert_eq!(body.data.len(), 3);
    assert!(body.data.windows(2).all(|w| w[0].date <= w[1].date));
    assert_eq!(body.data[0].volume, 8200);

    // ============================================
    // Case 5: OHLCV 指定区间
    // ============================================
    let res = client
        .get(format!("{}/ohlcv/AAPL", base_url))
        .query(&[("start_date", "2024-05-01"), ("end_date", "2024-05-31")])
        .send()
        .await
        .unwrap();
    let body: OhlcvResponse = res.json().await.unwrap();
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.data[0].close, 181.7);

    // ============================================
    // Case 6: 未知代码 -> 404
    // ============================================
    let res = client
        .get(format!("{}/ohlcv/ZZZZ", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["detail"],
        "No data found for ZZZZ in the specified date range"
    );

    // ============================================
    // Case 7: 非法日期与未知代码同样处理
    // ============================================
    let res = client
        .get(format!("{}/sentiment/TSLA", base_url))
        .query(&[("start_date", "not-a-date")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // ============================================
    // Case 8: 情绪序列
    // ============================================
    let res = client
        .get(format!("{}/sentiment/TSLA", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: SentimentResponse = res.json().await.unwrap();
    assert_eq!(body.company, "Tesla");
    let counts: Vec<u64> = body.data.iter().map(|p| p.article_count).collect();
    assert_eq!(counts, vec![3, 2]);

    // ============================================
    // Case 9: 热力图排序与空区间 404
    // ============================================
    let res = client
        .get(format!("{}/heatmap", base_url))
        .send()
        .await
        .unwrap();
    let body: HeatmapResponse = res.json().await.unwrap();
    assert_eq!(body.data.len(), 5);
    assert_eq!(body.data[0].company, "Apple");
    assert_eq!(body.data[1].company, "Tesla");

    let res = client
        .get(format!("{}/heatmap", base_url))
        .query(&[("start_date", "2023-01-01"), ("end_date", "2023-12-31")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["detail"], "No data found in the specified date range");

    // ============================================
    // Case 10: 每日汇总，空区间返回空列表
    // ============================================
    let res = client
        .get(format!("{}/daily-stats", base_url))
        .query(&[("start_date", "2024-01-02"), ("end_date", "2024-01-02")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: DailyStatsResponse = res.json().await.unwrap();
    assert_eq!(body.data.len(), 1);
    assert_eq!(body.data[0].article_count, 8);
    assert!((body.data[0].avg_sentiment.unwrap() - 0.3).abs() < 1e-9);

    let res = client
        .get(format!("{}/daily-stats", base_url))
        .query(&[("start_date", "2025-01-01")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: DailyStatsResponse = res.json().await.unwrap();
    assert!(body.data.is_empty());

    // ============================================
    // Case 11: OpenAPI 文档
    // ============================================
    let res = client
        .get(format!("{}/api-docs/openapi.json", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: Value = res.json().await.unwrap();
    assert!(doc["paths"]["/ohlcv/{symbol}"].is_object());
    assert!(doc["paths"]["/daily-stats"].is_object());

    // ============================================
    // Case 12: CORS 允许任意来源
    // ============================================
    let res = client
        .get(format!("{}/companies", base_url))
        .header("Origin", "http://dashboard.example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");

    let res = client
        .request(Method::OPTIONS, format!("{}/heatmap", base_url))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "GET")
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_empty_dataset_endpoints() {
    let (base_url, _file) = spawn_test_server(HEADER_ONLY_CSV).await;
    let client = reqwest::Client::new();

    // 只有表头的文件：时间范围 404，公司列表为空
    let res = client
        .get(format!("{}/time-range", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["detail"], "Dataset is empty");

    let res = client
        .get(format!("{}/companies", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: CompaniesResponse = res.json().await.unwrap();
    assert!(body.companies.is_empty());

    let res = client
        .get(format!("{}/daily-stats", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: DailyStatsResponse = res.json().await.unwrap();
    assert!(body.data.is_empty());
}
