use chrono::{Duration, Utc};
use reqwest::Method;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::json;
use server::utils::jwt::{self, ADMIN_ROLE, Claims};

use crate::common::{ADMIN_EMAIL, ADMIN_PASSWORD, TestApp, TestResponse, routes, test_config};

const JWT_SECRET: &str = "test-secret-for-integration-tests";

mod login {
    use super::*;

    #[tokio::test]
    async fn admin_can_login_and_receives_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200);
        let token = res.body["token"].as_str().expect("token should be a string");
        assert_eq!(token.split('.').count(), 3);
    }

    #[tokio::test]
    async fn cannot_login_with_wrong_password() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": ADMIN_EMAIL, "password": "wrong"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn cannot_login_as_anyone_but_the_admin() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "volunteer@example.org", "password": ADMIN_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn missing_password_returns_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"email": ADMIN_EMAIL}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "Email and password required");
    }

    #[tokio::test]
    async fn malformed_json_body_returns_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_raw(routes::LOGIN, "not valid json", "application/json")
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod rate_limit {
    use super::*;

    #[tokio::test]
    async fn twenty_first_attempt_in_the_window_is_throttled() {
        let app = TestApp::spawn().await;
        let wrong = json!({"email": ADMIN_EMAIL, "password": "wrong"});

        for attempt in 1..=20 {
            let res = app.post_without_token(routes::LOGIN, &wrong).await;
            assert_eq!(res.status, 401, "attempt {attempt}: {}", res.text);
        }

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 429);
        assert_eq!(res.body["code"], "RATE_LIMITED");
        let retry_after: u64 = res
            .header("retry-after")
            .expect("Retry-After header")
            .parse()
            .unwrap();
        assert!((1..=600).contains(&retry_after));
    }

    #[tokio::test]
    async fn malformed_attempts_count_toward_the_limit() {
        let mut config = test_config();
        config.auth.login_rate_limit.max_attempts = 2;
        let app = TestApp::spawn_with(config, MockDatabase::new(DatabaseBackend::Postgres)).await;

        for _ in 0..2 {
            let res = app.post_raw(routes::LOGIN, "{", "application/json").await;
            assert_eq!(res.status, 400);
        }

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            )
            .await;
        assert_eq!(res.status, 429);
    }

    #[tokio::test]
    async fn forwarded_clients_are_throttled_separately_behind_a_trusted_proxy() {
        let mut config = test_config();
        config.server.trust_proxy = true;
        config.auth.login_rate_limit.max_attempts = 1;
        let app = TestApp::spawn_with(config, MockDatabase::new(DatabaseBackend::Postgres)).await;
        let body = json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD});

        let login_from = |ip: &'static str| {
            let request = app
                .client
                .post(format!("http://{}{}", app.addr, routes::LOGIN))
                .header("X-Forwarded-For", ip)
                .json(&body);
            async move {
                TestResponse::from_response(request.send().await.expect("Failed to send request"))
                    .await
            }
        };

        assert_eq!(login_from("203.0.113.7").await.status, 200);
        assert_eq!(login_from("203.0.113.7").await.status, 429);
        assert_eq!(login_from("198.51.100.4").await.status, 200);
    }
}

mod authenticated_access {
    use super::*;

    #[tokio::test]
    async fn request_without_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ADMIN_POSTS).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn request_with_malformed_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ADMIN_POSTS, "not-a-valid-jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn non_bearer_authorization_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .get_with_header(routes::ADMIN_POSTS, "Authorization", "Basic YWRtaW46cGFzcw==")
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn token_from_login_opens_admin_routes() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app.get_with_token(routes::ADMIN_POSTS, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["posts"], json!([]));
    }
}

mod rejected_writes {
    use super::*;

    fn expired_token() -> String {
        let issued = Utc::now() - Duration::days(8);
        jwt::encode_claims(
            &Claims {
                role: ADMIN_ROLE.into(),
                email: ADMIN_EMAIL.into(),
                iat: issued.timestamp(),
                exp: (issued + Duration::days(7)).timestamp(),
            },
            JWT_SECRET,
        )
        .unwrap()
    }

    fn rejected_credentials() -> Vec<(Option<String>, &'static str)> {
        vec![
            (None, "TOKEN_MISSING"),
            (
                Some(jwt::sign(ADMIN_EMAIL, 7, "some-other-deployment").unwrap()),
                "TOKEN_INVALID",
            ),
            (Some(expired_token()), "TOKEN_INVALID"),
        ]
    }

    #[tokio::test]
    async fn post_writes_without_a_valid_token_change_nothing() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let res = app
            .post_with_token(
                routes::ADMIN_POSTS,
                &json!({
                    "title": "Harvest Report",
                    "status": "published",
                    "coverImage": {"url": "https://media.example.org/h.jpg", "publicId": "nonprofit/blog/h"},
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.body["post"]["id"].as_str().unwrap().to_string();
        let before = app.posts.snapshot();

        for (credential, code) in rejected_credentials() {
            let credential = credential.as_deref();
            let attempts = [
                (
                    Method::POST,
                    routes::ADMIN_POSTS.to_string(),
                    Some(json!({"title": "Intruder"})),
                ),
                (
                    Method::PUT,
                    routes::admin_post(&id),
                    Some(json!({"title": "Defaced", "status": "draft"})),
                ),
                (Method::DELETE, routes::admin_post(&id), None),
            ];
            for (method, path, body) in attempts {
                let res = app
                    .send(method.clone(), &path, body.as_ref(), credential)
                    .await;
                assert_eq!(res.status, 401, "{method} {path}: {}", res.text);
                assert_eq!(res.body["code"], code, "{method} {path}");
            }
        }

        assert_eq!(app.posts.snapshot(), before);
        assert!(app.media.destroyed.lock().unwrap().is_empty());

        let res = app
            .get_without_token(&routes::blog_post("harvest-report"))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["post"]["title"], "Harvest Report");
    }

    #[tokio::test]
    async fn upload_with_a_foreign_token_is_not_relayed() {
        let app = TestApp::spawn().await;
        let foreign = jwt::sign(ADMIN_EMAIL, 7, "some-other-deployment").unwrap();

        let res = app
            .upload_with_token(
                routes::UPLOAD,
                "logo.png",
                "image/png",
                b"\x89PNG\r\n\x1a\n".to_vec(),
                &foreign,
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
        assert!(app.media.uploads.lock().unwrap().is_empty());
    }
}
