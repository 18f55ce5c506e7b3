use serde_json::json;

use crate::common::{TestApp, routes};

mod create_post {
    use super::*;

    #[tokio::test]
    async fn admin_can_create_a_draft_with_defaults() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::ADMIN_POSTS,
                &json!({"title": "Clean Water for Kisumu"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        let post = &res.body["post"];
        assert_eq!(post["slug"], "clean-water-for-kisumu");
        assert_eq!(post["status"], "draft");
        assert!(post["publishedAt"].is_null());
        assert_eq!(post["category"], "General");
        assert_eq!(post["tags"], json!([]));
    }

    #[tokio::test]
    async fn publishing_on_create_stamps_published_at() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let post = app.create_post(&token, "Spring Gala", "published").await;

        assert_eq!(post["status"], "published");
        assert!(post["publishedAt"].is_string());
    }

    #[tokio::test]
    async fn unknown_status_creates_a_draft() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let post = app.create_post(&token, "Almost live", "Published").await;

        assert_eq!(post["status"], "draft");
        assert!(post["publishedAt"].is_null());
    }

    #[tokio::test]
    async fn duplicate_titles_receive_numbered_slugs() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let first = app.create_post(&token, "Volunteer Day", "draft").await;
        let second = app.create_post(&token, "Volunteer Day", "draft").await;
        let third = app.create_post(&token, "volunteer   day!", "draft").await;

        assert_eq!(first["slug"], "volunteer-day");
        assert_eq!(second["slug"], "volunteer-day-1");
        assert_eq!(third["slug"], "volunteer-day-2");
    }

    #[tokio::test]
    async fn blank_title_returns_validation_error() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(routes::ADMIN_POSTS, &json!({"title": "   "}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "Title is required");
        assert!(app.posts.snapshot().is_empty());
    }

    #[tokio::test]
    async fn tags_are_trimmed_and_blank_ones_dropped() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::ADMIN_POSTS,
                &json!({"title": "Tagged", "tags": [" water ", "", "health"]}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["post"]["tags"], json!(["water", "health"]));
    }
}

mod update_post {
    use super::*;

    #[tokio::test]
    async fn publishing_a_draft_sets_published_at_and_keeps_slug() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let draft = app.create_post(&token, "Food Drive", "draft").await;
        let id = draft["id"].as_str().unwrap();

        let res = app
            .put_with_token(
                &routes::admin_post(id),
                &json!({"title": "Food Drive Recap", "status": "published"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        let post = &res.body["post"];
        assert_eq!(post["title"], "Food Drive Recap");
        assert_eq!(post["slug"], "food-drive");
        assert_eq!(post["status"], "published");
        assert!(post["publishedAt"].is_string());
    }

    #[tokio::test]
    async fn republishing_keeps_the_original_published_at() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let post = app.create_post(&token, "Annual Appeal", "published").await;
        let id = post["id"].as_str().unwrap();

        let res = app
            .put_with_token(
                &routes::admin_post(id),
                &json!({"status": "published", "excerpt": "Updated"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["post"]["publishedAt"], post["publishedAt"]);
    }

    #[tokio::test]
    async fn reverting_to_draft_clears_published_at() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let post = app.create_post(&token, "Press Release", "published").await;
        let id = post["id"].as_str().unwrap();

        let res = app
            .put_with_token(&routes::admin_post(id), &json!({"status": "draft"}), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["post"]["status"], "draft");
        assert!(res.body["post"]["publishedAt"].is_null());
    }

    #[tokio::test]
    async fn null_cover_image_removes_it() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let res = app
            .post_with_token(
                routes::ADMIN_POSTS,
                &json!({
                    "title": "With cover",
                    "coverImage": {"url": "https://media.example.org/a.jpg", "publicId": "a"},
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.body["post"]["id"].as_str().unwrap().to_string();

        let res = app
            .put_with_token(&routes::admin_post(&id), &json!({"coverImage": null}), &token)
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["post"]["coverImage"].is_null());
    }

    #[tokio::test]
    async fn unknown_or_malformed_id_returns_not_found() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        for id in ["0190c3a1-0000-7000-8000-000000000000", "not-a-uuid"] {
            let res = app
                .put_with_token(&routes::admin_post(id), &json!({"title": "x"}), &token)
                .await;
            assert_eq!(res.status, 404, "id {id}");
            assert_eq!(res.body["code"], "NOT_FOUND");
        }
    }
}

mod delete_post {
    use super::*;

    #[tokio::test]
    async fn deleting_removes_the_post_and_its_cover() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let res = app
            .post_with_token(
                routes::ADMIN_POSTS,
                &json!({
                    "title": "Gone soon",
                    "status": "published",
                    "coverImage": {"url": "https://media.example.org/b.jpg", "publicId": "nonprofit/blog/b"},
                }),
                &token,
            )
            .await;
        let id = res.body["post"]["id"].as_str().unwrap().to_string();

        let res = app.delete_with_token(&routes::admin_post(&id), &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!({"ok": true}));
        assert_eq!(
            app.media.destroyed.lock().unwrap().as_slice(),
            ["nonprofit/blog/b".to_string()]
        );

        let res = app.get_without_token(&routes::blog_post("gone-soon")).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn deleting_twice_returns_not_found() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let post = app.create_post(&token, "Once", "draft").await;
        let path = routes::admin_post(post["id"].as_str().unwrap());

        assert_eq!(app.delete_with_token(&path, &token).await.status, 200);
        let res = app.delete_with_token(&path, &token).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod list_posts {
    use super::*;

    #[tokio::test]
    async fn admin_listing_includes_drafts_and_filters_by_status() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        app.create_post(&token, "Draft one", "draft").await;
        app.create_post(&token, "Live one", "published").await;

        let all = app.get_with_token(routes::ADMIN_POSTS, &token).await;
        assert_eq!(all.status, 200);
        assert_eq!(all.body["posts"].as_array().unwrap().len(), 2);

        let drafts = app
            .get_with_token(&format!("{}?status=draft", routes::ADMIN_POSTS), &token)
            .await;
        let drafts = drafts.body["posts"].as_array().unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0]["title"], "Draft one");
    }

    #[tokio::test]
    async fn unknown_status_filter_returns_validation_error() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .get_with_token(&format!("{}?status=archived", routes::ADMIN_POSTS), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}
