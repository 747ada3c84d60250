use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hostlib_http::{Error, Header, HttpClient};

#[tokio::test]
async fn test_get_returns_body_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/greeting"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello there"))
        .mount(&server)
        .await;

    let url = format!("{}/greeting", server.uri());

    let response = tokio::task::spawn_blocking(move || hostlib_http::get(&url, &[]).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "hello there");
}

#[tokio::test]
async fn test_get_sends_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/secure"))
        .and(header("X-Token", "abc123"))
        .and(header("Accept", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/secure", server.uri());

    let response = tokio::task::spawn_blocking(move || {
        let client = HttpClient::new().unwrap();
        client
            .get(
                &url,
                &[
                    Header::new("X-Token", "abc123"),
                    Header::new("Accept", "text/plain"),
                ],
            )
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_error_status_still_returns_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());

    let response = tokio::task::spawn_blocking(move || hostlib_http::get(&url, &[]).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
    assert_eq!(response.body, "not here");
}

#[tokio::test]
async fn test_post_sends_content_type_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("Content-Type", "application/json"))
        .and(body_string(r#"{"name":"widget"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":7}"#))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/items", server.uri());

    let response = tokio::task::spawn_blocking(move || {
        hostlib_http::post(&url, "application/json", r#"{"name":"widget"}"#, &[]).unwrap()
    })
    .await
    .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.body, r#"{"id":7}"#);
}

#[tokio::test]
async fn test_post_header_overrides_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header("Content-Type", "text/csv"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/upload", server.uri());

    let response = tokio::task::spawn_blocking(move || {
        hostlib_http::post(
            &url,
            "text/plain",
            "a,b\n1,2\n",
            &[Header::new("Content-Type", "text/csv")],
        )
        .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "");
}

#[tokio::test]
async fn test_connection_refused_is_connect_error() {
    let err = tokio::task::spawn_blocking(|| hostlib_http::get("http://127.0.0.1:1/", &[]).unwrap_err())
        .await
        .unwrap();

    assert!(matches!(err, Error::Connect { .. }));
    assert!(err.to_string().starts_with("can't connect to"));
}
