//! `HttpClient` against a local mock of the Figma REST API.

use figma_colors::api::{ApiError, FigmaApi, HttpClient, TOKEN_HEADER};
use serde_json::json;
use wiremock::{
  matchers::{header, method, path},
  Mock, MockServer, ResponseTemplate,
};

const TOKEN: &str = "5856-test-token";

/// The blocking client owns its own runtime, so it runs off the test's async threads.
async fn blocking<T, F>(f: F) -> T
where
  T: Send + 'static,
  F: FnOnce() -> T + Send + 'static
{
  tokio::task::spawn_blocking(f).await.unwrap()
}

async fn mock_get(server: &MockServer, route: &str, response: ResponseTemplate) {
  Mock::given(method("GET"))
    .and(path(route))
    .and(header(TOKEN_HEADER, TOKEN))
    .respond_with(response)
    .expect(1)
    .mount(server)
    .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn lists_projects_with_the_token_header() {
  let server = MockServer::start().await;
  mock_get(&server, "/v1/teams/T1/projects", ResponseTemplate::new(200).set_body_json(json!({
    "name": "Team",
    "projects": [{ "id": "2", "name": "Web" }, { "id": "1", "name": "App" }]
  }))).await;

  let uri = server.uri();
  let projects = blocking(move || HttpClient::new(&uri).unwrap().list_projects("T1", TOKEN)).await.unwrap();

  let names: Vec<&str> = projects.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, ["Web", "App"]);
  assert_eq!(projects[0].id, "2");
}

#[tokio::test(flavor = "multi_thread")]
async fn lists_files_of_a_project() {
  let server = MockServer::start().await;
  mock_get(&server, "/v1/projects/P1/files", ResponseTemplate::new(200).set_body_json(json!({
    "name": "Design System",
    "files": [{ "key": "k1", "name": "Colors", "thumbnail_url": "https://x", "last_modified": "2024-01-01T00:00:00Z" }]
  }))).await;

  let uri = server.uri();
  let files = blocking(move || HttpClient::new(&uri).unwrap().list_files("P1", TOKEN)).await.unwrap();

  assert_eq!(files.len(), 1);
  assert_eq!(files[0].key, "k1");
  assert_eq!(files[0].name, "Colors");
}

#[tokio::test(flavor = "multi_thread")]
async fn fetches_the_raw_document_in_response_order() {
  let server = MockServer::start().await;
  let body = r#"{"styles":{"Z":{"name":"Last","styleType":"FILL"},"A":{"name":"First","styleType":"FILL"}},"document":{"children":[]}}"#;
  mock_get(&server, "/v1/files/K1", ResponseTemplate::new(200).set_body_string(body)).await;

  let uri = server.uri();
  let doc = blocking(move || HttpClient::new(&uri).unwrap().get_file("K1", TOKEN)).await.unwrap();

  let ids: Vec<&String> = doc["styles"].as_object().unwrap().keys().collect();
  assert_eq!(ids, ["Z", "A"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn error_statuses_keep_code_and_body() {
  let server = MockServer::start().await;
  mock_get(&server, "/v1/teams/T1/projects", ResponseTemplate::new(403)
    .set_body_string(r#"{"status":403,"err":"Invalid token"}"#)).await;

  let uri = server.uri();
  let err = blocking(move || HttpClient::new(&uri).unwrap().list_projects("T1", TOKEN)).await.unwrap_err();

  match err {
    ApiError::Status { url, status, body } => {
      assert!(url.ends_with("/v1/teams/T1/projects"));
      assert_eq!(status, 403);
      assert!(body.contains("Invalid token"));
    }
    other => panic!("expected a status error, got {other:?}")
  }
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_bodies_are_decode_errors() {
  let server = MockServer::start().await;
  mock_get(&server, "/v1/projects/P1/files", ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

  let uri = server.uri();
  let err = blocking(move || HttpClient::new(&uri).unwrap().list_files("P1", TOKEN)).await.unwrap_err();

  assert!(matches!(err, ApiError::Decode { .. }), "{err:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_servers_are_transport_errors() {
  let err = blocking(|| HttpClient::new("http://127.0.0.1:9").unwrap().get_file("K1", TOKEN)).await.unwrap_err();

  assert!(matches!(err, ApiError::Transport { .. }), "{err:?}");
}
