mod common;

use anyhow::Result;
use axum::http::StatusCode;
use chrono::DateTime;

use common::MemoryStore;

#[tokio::test]
async fn health_reports_database_and_property_count() -> Result<()> {
    let router = common::router(MemoryStore {
        properties: 12,
        ..Default::default()
    });

    let res = common::get(&router, "/api/health").await?;

    assert_eq!(res.status, StatusCode::OK, "unexpected body: {}", res.body);
    assert_eq!(res.body["status"], "healthy");
    assert_eq!(res.body["database"], "connected");
    assert_eq!(res.body["propertiesCount"], 12);
    assert!(DateTime::parse_from_rfc3339(res.body["timestamp"].as_str().unwrap_or_default()).is_ok());
    Ok(())
}

#[tokio::test]
async fn health_environment_is_presence_flags_only() -> Result<()> {
    let router = common::router(MemoryStore::default());

    let res = common::get(&router, "/api/health").await?;
    let environment = &res.body["environment"];

    assert_eq!(environment["hasDatabaseUrl"], true);
    assert_eq!(environment["hasJwtSecret"], true);
    assert_eq!(environment["hasMapsApiKey"], false);
    assert_eq!(environment["mode"], "development");

    let raw = res.body.to_string();
    assert!(!raw.contains(common::JWT_SECRET), "secret leaked: {}", raw);
    assert!(!raw.contains("postgres://"), "database url leaked: {}", raw);
    Ok(())
}

#[tokio::test]
async fn health_with_unreachable_database_is_unhealthy() -> Result<()> {
    let router = common::router(MemoryStore {
        unreachable: true,
        ..Default::default()
    });

    let res = common::get(&router, "/api/health").await?;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.body["status"], "unhealthy");
    assert!(res.body["error"].as_str().map(|e| !e.is_empty()).unwrap_or(false), "missing error: {}", res.body);
    assert!(DateTime::parse_from_rfc3339(res.body["timestamp"].as_str().unwrap_or_default()).is_ok());
    assert!(res.body.get("propertiesCount").is_none());
    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints_and_unknown_routes_404() -> Result<()> {
    let router = common::router(MemoryStore::default());

    let root = common::get(&router, "/").await?;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.body["name"], "Estate API");

    let missing = common::get(&router, "/api/nope").await?;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "Not found");
    Ok(())
}
