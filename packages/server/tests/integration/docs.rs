use crate::common::{TestApp, routes};

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::HEALTH).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body, serde_json::json!({"ok": true}));
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::HEALTH).await;

    assert_eq!(res.header("x-content-type-options"), Some("nosniff"));
    assert_eq!(res.header("x-frame-options"), Some("DENY"));
    assert_eq!(res.header("referrer-policy"), Some("no-referrer"));
}

#[tokio::test]
async fn openapi_document_lists_public_and_admin_paths() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::OPENAPI).await;

    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().expect("paths object");
    for path in [
        "/api/health",
        "/api/blog/{slug}",
        "/api/admin/auth/login",
        "/api/admin/posts/{id}",
        "/api/admin/upload",
    ] {
        assert!(paths.contains_key(path), "missing {path}");
    }
}
