//! API client core tests
//!
//! Header construction, token lifecycle, error mapping and decoding,
//! against a mockito server.

use mockito::{Matcher, Server};
use serde_json::json;
use streamhub::api::{ApiClient, RequestOptions};
use streamhub::models::{Content, ContentQuery, ContentType};
use streamhub::{ApiError, MemoryTokenStore};
use tokio_test::{assert_err, assert_ok};

// =============================================================================
// Authorization Header
// =============================================================================

#[tokio::test]
async fn test_no_token_sends_no_authorization() {
    let mut server = Server::new_async().await;

    let mut mocks = Vec::new();
    for method in ["GET", "POST", "PUT", "DELETE"] {
        let mock = server
            .mock(method, "/anything")
            .match_header("authorization", Matcher::Missing)
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;
        mocks.push(mock);
    }

    let client = ApiClient::with_base_url(server.url());
    assert!(!client.is_authenticated());

    for options in [
        RequestOptions::get(),
        RequestOptions::post(),
        RequestOptions::put(),
        RequestOptions::delete(),
    ] {
        assert_ok!(client.request_json("/anything", options).await);
    }

    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_token_attached_until_changed() {
    let mut server = Server::new_async().await;

    let first = server
        .mock("GET", "/auth/profile")
        .match_header("authorization", "Bearer abc")
        .with_status(200)
        .with_body(r#"{"id": 1, "username": "neo"}"#)
        .expect(2)
        .create_async()
        .await;

    let client = ApiClient::with_base_url(server.url());
    client.set_token(Some("abc")).unwrap();

    let user = assert_ok!(client.get_profile().await);
    assert_eq!(user.username, "neo");
    assert_ok!(client.get_profile().await);
    first.assert_async().await;

    let second = server
        .mock("GET", "/auth/profile")
        .match_header("authorization", "Bearer xyz")
        .with_status(200)
        .with_body(r#"{"id": 1, "username": "neo"}"#)
        .create_async()
        .await;

    client.set_token(Some("xyz")).unwrap();
    assert_ok!(client.get_profile().await);
    second.assert_async().await;
}

#[tokio::test]
async fn test_clearing_token_empties_store_and_header() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/genres")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let store = MemoryTokenStore::with_token("stale");
    let client = ApiClient::with_store(server.url(), store.clone());
    assert_eq!(client.token().as_deref(), Some("stale"));

    client.set_token(None).unwrap();
    assert!(store.get().is_none());
    assert!(client.token().is_none());

    let genres = assert_ok!(client.get_genres().await);
    assert!(genres.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_token_read_from_store_at_construction() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/favorites")
        .match_header("authorization", "Bearer persisted")
        .with_status(200)
        .with_body(r#"{"favorites": [], "pagination": {"page": 1, "per_page": 20, "total": 0, "pages": 0}}"#)
        .create_async()
        .await;

    let client = ApiClient::with_store(server.url(), MemoryTokenStore::with_token("persisted"));
    let page = assert_ok!(client.get_favorites(&Default::default()).await);
    assert!(page.favorites.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_caller_header_overrides_default() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/upload")
        .match_header("content-type", "text/plain")
        .match_header("x-request-id", "42")
        .with_status(200)
        .with_body(r#"{"ok": true}"#)
        .create_async()
        .await;

    let client = ApiClient::with_base_url(server.url());
    let options = RequestOptions::post()
        .header("Content-Type", "text/plain")
        .header("X-Request-Id", "42");

    let body = assert_ok!(client.request_json("/upload", options).await);
    assert_eq!(body, json!({"ok": true}));
    mock.assert_async().await;
}

// =============================================================================
// Error Mapping
// =============================================================================

#[tokio::test]
async fn test_404_uses_server_message() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/content/999")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Not found"}"#)
        .create_async()
        .await;

    let client = ApiClient::with_base_url(server.url());
    let err = assert_err!(client.get_content_detail(999).await);

    mock.assert_async().await;
    assert_eq!(err.to_string(), "Not found");
    assert!(matches!(err, ApiError::Http { status: 404, .. }));
    assert!(err.is_request_failure());
}

#[tokio::test]
async fn test_500_without_message_uses_fallback() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/content")
        .with_status(500)
        .with_body(r#"{"error": "database is locked"}"#)
        .create_async()
        .await;

    let client = ApiClient::with_base_url(server.url());
    let err = assert_err!(client.get_content(&ContentQuery::default()).await);

    mock.assert_async().await;
    assert_eq!(err.to_string(), "API request failed");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_non_json_error_body_uses_fallback() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/genres")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let client = ApiClient::with_base_url(server.url());
    let err = assert_err!(client.get_genres().await);

    mock.assert_async().await;
    assert_eq!(err.to_string(), "API request failed");
}

#[tokio::test]
async fn test_non_json_success_is_decode_error() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/genres")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = ApiClient::with_base_url(server.url());
    let err = assert_err!(client.get_genres().await);

    mock.assert_async().await;
    assert!(matches!(err, ApiError::Decode(_)));
    assert!(!err.is_request_failure());
}

#[tokio::test]
async fn test_wrong_shape_is_decode_error() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/content/1")
        .with_status(200)
        .with_body(r#"{"id": "one"}"#)
        .create_async()
        .await;

    let client = ApiClient::with_base_url(server.url());
    let err = assert_err!(client.get_content_detail(1).await);

    mock.assert_async().await;
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 1
    let client = ApiClient::with_base_url("http://127.0.0.1:1");
    let err = assert_err!(client.get_genres().await);

    assert!(matches!(err, ApiError::Transport(_)));
    assert!(err.is_request_failure());
    assert!(!err.to_string().is_empty());
}

#[tokio::test]
async fn test_rejected_token_surfaces_without_logout() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/auth/profile")
        .with_status(401)
        .with_body(r#"{"message": "Token is invalid or expired"}"#)
        .create_async()
        .await;

    let client = ApiClient::with_store(server.url(), MemoryTokenStore::with_token("expired"));
    let err = assert_err!(client.get_profile().await);

    mock.assert_async().await;
    assert_eq!(err.to_string(), "Token is invalid or expired");
    // Token is kept; deciding to log out is the caller's job
    assert_eq!(client.token().as_deref(), Some("expired"));
}

// =============================================================================
// Decoding & Query Strings
// =============================================================================

#[tokio::test]
async fn test_content_detail_returned_unmodified() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/content/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":1,"title":"X"}"#)
        .create_async()
        .await;

    let client = ApiClient::with_base_url(server.url());
    let content: Content = assert_ok!(client.get_content_detail(1).await);

    mock.assert_async().await;
    assert_eq!(content.id, 1);
    assert_eq!(content.title, "X");
    assert_eq!(
        serde_json::to_value(&content).unwrap(),
        json!({"id": 1, "title": "X"})
    );
}

#[tokio::test]
async fn test_null_columns_returned_unmodified() {
    let mut server = Server::new_async().await;

    let body = json!({
        "id": 1, "title": "X", "description": null, "content_type": "movie",
        "cover_image": null, "trailer_url": null, "release_year": null, "duration": null,
        "rating": 0.0, "imdb_rating": null, "language": null, "country": null,
        "director": null, "cast": null, "is_active": true, "is_featured": false,
        "view_count": 0, "created_at": "2024-05-01T12:00:00", "updated_at": null,
        "video_url": null, "genres": []
    });
    let mock = server
        .mock("GET", "/content/1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(2)
        .create_async()
        .await;

    let client = ApiClient::with_base_url(server.url());
    let content: Content = assert_ok!(client.get_content_detail(1).await);
    let raw = assert_ok!(client.request_json("/content/1", RequestOptions::get()).await);

    mock.assert_async().await;
    assert_eq!(content.content_type, Some(ContentType::Movie));
    assert_eq!(raw, body);
    assert_eq!(serde_json::to_value(&content).unwrap(), body);
}

#[tokio::test]
async fn test_request_json_passthrough() {
    let mut server = Server::new_async().await;

    let body = json!({"id": 1, "title": "X", "nested": {"a": [1, 2, 3]}});
    let mock = server
        .mock("GET", "/content/1")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = ApiClient::with_base_url(server.url());
    let value = assert_ok!(client.request_json("/content/1", RequestOptions::get()).await);

    mock.assert_async().await;
    assert_eq!(value, body);
}

#[tokio::test]
async fn test_content_query_string() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/content")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("type".into(), "movie".into()),
            Matcher::UrlEncoded("per_page".into(), "8".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{
                "content": [{"id": 5, "title": "Heat", "content_type": "movie"}],
                "pagination": {"page": 1, "per_page": 8, "total": 1, "pages": 1,
                               "has_next": false, "has_prev": false}
            }"#,
        )
        .create_async()
        .await;

    let client = ApiClient::with_base_url(server.url());
    let query = ContentQuery {
        content_type: Some(ContentType::Movie),
        per_page: Some(8),
        ..Default::default()
    };
    let page = assert_ok!(client.get_content(&query).await);

    mock.assert_async().await;
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].content_type, Some(ContentType::Movie));
    assert_eq!(page.pagination.per_page, 8);
    assert!(!page.pagination.has_more());
}

#[tokio::test]
async fn test_empty_query_adds_no_question_mark() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/content")
        .match_query(Matcher::Exact(String::new()))
        .with_status(200)
        .with_body(r#"{"content": [], "pagination": {"page": 1, "per_page": 20}}"#)
        .create_async()
        .await;

    let client = ApiClient::with_base_url(server.url());
    let page = assert_ok!(client.get_content(&ContentQuery::default()).await);

    mock.assert_async().await;
    assert!(page.content.is_empty());
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn test_independent_calls_in_flight_together() {
    let mut server = Server::new_async().await;

    let detail = server
        .mock("GET", "/content/1")
        .with_status(200)
        .with_body(r#"{"id": 1, "title": "One"}"#)
        .create_async()
        .await;
    let favorite = server
        .mock("GET", "/favorites/1/check")
        .with_status(200)
        .with_body(r#"{"is_favorite": true}"#)
        .create_async()
        .await;
    let genres = server
        .mock("GET", "/genres")
        .with_status(500)
        .with_body(r#"{"message": "Failed to fetch genres"}"#)
        .create_async()
        .await;

    let client = ApiClient::with_store(server.url(), MemoryTokenStore::with_token("t"));
    let (content, status, genre_err) = futures::join!(
        client.get_content_detail(1),
        client.check_favorite(1),
        client.get_genres(),
    );

    detail.assert_async().await;
    favorite.assert_async().await;
    genres.assert_async().await;

    assert_eq!(content.unwrap().title, "One");
    assert!(status.unwrap().is_favorite);
    // One failure does not affect the others
    assert_eq!(genre_err.unwrap_err().to_string(), "Failed to fetch genres");
}
