use crate::common::{TestApp, TestResponse, routes};

const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01\x08\x06\0\0\0";

#[tokio::test]
async fn admin_can_upload_an_image() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app
        .upload_with_token(routes::UPLOAD, "logo.png", "image/png", PNG_HEADER.to_vec(), &token)
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["image"]["publicId"], "nonprofit/blog/upload-0");
    assert_eq!(
        res.body["image"]["url"],
        "https://media.example.org/nonprofit/blog/upload-0"
    );

    let uploads = app.media.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].content_type, "image/png");
    assert_eq!(uploads[0].file_name.as_deref(), Some("logo.png"));
    assert_eq!(uploads[0].bytes, PNG_HEADER);
}

#[tokio::test]
async fn generic_content_type_is_resolved_from_the_file_name() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app
        .upload_with_token(
            routes::UPLOAD,
            "photo.jpg",
            "application/octet-stream",
            vec![0xFF, 0xD8, 0xFF, 0xE0],
            &token,
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(app.media.uploads.lock().unwrap()[0].content_type, "image/jpeg");
}

#[tokio::test]
async fn non_image_files_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app
        .upload_with_token(routes::UPLOAD, "notes.txt", "text/plain", b"hello".to_vec(), &token)
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(app.media.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn files_over_the_limit_are_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let res = app
        .upload_with_token(
            routes::UPLOAD,
            "huge.png",
            "image/png",
            vec![0u8; 5 * 1024 * 1024 + 1],
            &token,
        )
        .await;

    assert_eq!(res.status, 400, "{}", res.text);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
    assert!(app.media.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_file_field_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let form = reqwest::multipart::Form::new().text("caption", "no file here");
    let res = app
        .client
        .post(format!("http://{}{}", app.addr, routes::UPLOAD))
        .header("Authorization", format!("Bearer {token}"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send multipart upload request");
    let res = TestResponse::from_response(res).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["message"], "file is required");
}

#[tokio::test]
async fn upload_requires_a_token() {
    let app = TestApp::spawn().await;

    let part = reqwest::multipart::Part::bytes(PNG_HEADER.to_vec())
        .file_name("logo.png")
        .mime_str("image/png")
        .unwrap();
    let res = app
        .client
        .post(format!("http://{}{}", app.addr, routes::UPLOAD))
        .multipart(reqwest::multipart::Form::new().part("file", part))
        .send()
        .await
        .expect("Failed to send multipart upload request");
    let res = TestResponse::from_response(res).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
    assert!(app.media.uploads.lock().unwrap().is_empty());
}
