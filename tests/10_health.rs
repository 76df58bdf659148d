mod common;

use anyhow::Result;
use axum::http::StatusCode;

#[tokio::test]
async fn health_reports_ok_with_memory_store() -> Result<()> {
    let app = common::TestApp::new();

    let res = app.get("/health").await?;

    assert_eq!(res.status, StatusCode::OK, "unexpected body: {}", res.body);
    assert_eq!(res.data()["status"], "ok");
    assert_eq!(res.data()["database"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    let app = common::TestApp::new();

    let res = app.get("/").await?;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.data()["endpoints"]["health"], "/health");
    Ok(())
}
