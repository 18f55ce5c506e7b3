use serde_json::json;

use crate::common::{TestApp, routes};

async fn seed(app: &TestApp, published: usize, drafts: usize) -> String {
    let token = app.admin_token().await;
    for i in 0..published {
        app.create_post(&token, &format!("Story {i}"), "published").await;
    }
    for i in 0..drafts {
        app.create_post(&token, &format!("Draft {i}"), "draft").await;
    }
    token
}

fn titles(body: &serde_json::Value) -> Vec<String> {
    body["posts"]
        .as_array()
        .expect("posts should be an array")
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

mod public_listing {
    use super::*;

    #[tokio::test]
    async fn lists_only_published_posts_newest_first() {
        let app = TestApp::spawn().await;
        seed(&app, 3, 2).await;

        let res = app.get_without_token(routes::BLOG).await;

        assert_eq!(res.status, 200);
        assert_eq!(titles(&res.body), ["Story 2", "Story 1", "Story 0"]);
        assert_eq!(res.body["page"], 1);
        assert_eq!(res.body["limit"], 9);
        assert_eq!(res.body["total"], 3);
        assert_eq!(res.body["pages"], 1);
    }

    #[tokio::test]
    async fn pages_through_published_posts() {
        let app = TestApp::spawn().await;
        seed(&app, 5, 1).await;

        let res = app
            .get_without_token(&format!("{}?page=2&limit=2", routes::BLOG))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(titles(&res.body), ["Story 2", "Story 1"]);
        assert_eq!(res.body["total"], 5);
        assert_eq!(res.body["pages"], 3);
    }

    #[tokio::test]
    async fn out_of_range_and_unparsable_parameters_are_normalized() {
        let app = TestApp::spawn().await;
        seed(&app, 2, 0).await;

        let res = app
            .get_without_token(&format!("{}?page=-4&limit=500", routes::BLOG))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["page"], 1);
        assert_eq!(res.body["limit"], 30);

        let res = app
            .get_without_token(&format!("{}?page=abc&limit=", routes::BLOG))
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["page"], 1);
        assert_eq!(res.body["limit"], 9);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let app = TestApp::spawn().await;
        seed(&app, 2, 3).await;

        let res = app
            .get_without_token(&format!("{}?page=2&limit=2", routes::BLOG))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["posts"], json!([]));
        assert_eq!(res.body["pages"], 1);
    }

    #[tokio::test]
    async fn largest_page_number_is_an_empty_page() {
        let app = TestApp::spawn().await;
        seed(&app, 2, 0).await;

        let res = app
            .get_without_token(&format!("{}?page={}&limit=30", routes::BLOG, i64::MAX))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["posts"], json!([]));
        assert_eq!(res.body["page"], i64::MAX);
        assert_eq!(res.body["total"], 2);
    }
}

mod latest {
    use super::*;

    #[tokio::test]
    async fn returns_three_by_default() {
        let app = TestApp::spawn().await;
        seed(&app, 5, 1).await;

        let res = app.get_without_token(routes::BLOG_LATEST).await;

        assert_eq!(res.status, 200);
        assert_eq!(titles(&res.body), ["Story 4", "Story 3", "Story 2"]);
    }

    #[tokio::test]
    async fn limit_is_clamped() {
        let app = TestApp::spawn().await;
        seed(&app, 2, 0).await;

        let res = app
            .get_without_token(&format!("{}?limit=0", routes::BLOG_LATEST))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(titles(&res.body), ["Story 1"]);
    }
}

mod by_slug {
    use super::*;

    #[tokio::test]
    async fn published_post_is_found_by_slug() {
        let app = TestApp::spawn().await;
        seed(&app, 1, 0).await;

        let res = app.get_without_token(&routes::blog_post("story-0")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["post"]["title"], "Story 0");
        assert_eq!(res.body["post"]["status"], "published");
    }

    #[tokio::test]
    async fn draft_slug_returns_not_found() {
        let app = TestApp::spawn().await;
        seed(&app, 0, 1).await;

        let res = app.get_without_token(&routes::blog_post("draft-0")).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["message"], "Post not found");
    }

    #[tokio::test]
    async fn unpublishing_hides_the_post() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let post = app.create_post(&token, "Short lived", "published").await;
        assert_eq!(
            app.get_without_token(&routes::blog_post("short-lived")).await.status,
            200
        );

        let res = app
            .put_with_token(
                &routes::admin_post(post["id"].as_str().unwrap()),
                &json!({"status": "draft"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 200);

        let res = app.get_without_token(&routes::blog_post("short-lived")).await;
        assert_eq!(res.status, 404);
    }
}
