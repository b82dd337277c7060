//! Integration tests for post and comment mutations.

use std::sync::Arc;

use postboard_client::api::ApiClient;
use postboard_client::config::Config;
use postboard_client::notify::RecordingNotifier;
use postboard_client::session::{MemoryStore, SessionStore};
use postboard_client::view::PanelKind;
use postboard_client::Board;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn board(server: &MockServer, token: Option<&str>) -> (Board, Arc<RecordingNotifier>) {
    let config = Config {
        api_base_url: server.uri(),
        ..Config::for_testing()
    };
    let api = ApiClient::new(&config).expect("Failed to build client");
    let store = match token {
        Some(token) => MemoryStore::with_entries([("token", token), ("username", "alice")]),
        None => MemoryStore::new(),
    };
    let session = SessionStore::load(Box::new(store)).expect("Failed to load session");
    let notifier = Arc::new(RecordingNotifier::new());
    (Board::new(api, session, notifier.clone()), notifier)
}

async fn mount_empty_list(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/post/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_post_without_session_alerts_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let (board, notifier) = board(&server, None);
    assert!(board.create_post("t", "d").await.is_err());
    assert_eq!(
        notifier.alerts(),
        vec!["Unable to post. Are you still logged in?"]
    );
}

#[tokio::test]
async fn test_create_post_clears_draft_and_resyncs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({"title": "t", "description": "d"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&server)
        .await;
    mount_empty_list(&server, 1).await;

    let (board, notifier) = board(&server, Some("tok"));
    board.update_compose("t", "d").await;
    assert_eq!(board.ui().await.open_panel, Some(PanelKind::Compose));

    board.submit_compose().await.unwrap();

    let ui = board.ui().await;
    assert_eq!(ui.open_panel, None);
    assert!(ui.compose.title.is_empty());
    assert!(ui.compose.description.is_empty());
    assert!(notifier.alerts().is_empty());
}

#[tokio::test]
async fn test_failed_create_post_keeps_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    mount_empty_list(&server, 0).await;

    let (board, notifier) = board(&server, Some("expired"));
    board.update_compose("kept", "body").await;
    let before = board.page().await;

    assert!(board.submit_compose().await.is_err());

    let ui = board.ui().await;
    assert_eq!(ui.compose.title, "kept");
    assert_eq!(ui.open_panel, Some(PanelKind::Compose));
    assert_eq!(board.page().await, before);
    assert_eq!(
        notifier.alerts(),
        vec!["Unable to post. Are you still logged in?"]
    );
    assert_eq!(board.session().token().as_deref(), Some("expired"));
}

#[tokio::test]
async fn test_delete_post_not_owner() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/post/4"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;
    mount_empty_list(&server, 0).await;

    let (board, notifier) = board(&server, Some("tok"));
    assert!(board.delete_post(4).await.is_err());
    assert_eq!(board.session().token().as_deref(), Some("tok"));
    assert_eq!(
        notifier.alerts(),
        vec!["Unable to delete. Are you still logged in and the author of the post?"]
    );
}

#[tokio::test]
async fn test_delete_post_resyncs() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/post/4"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_empty_list(&server, 1).await;

    let (board, notifier) = board(&server, Some("tok"));
    board.delete_post(4).await.unwrap();
    assert!(notifier.alerts().is_empty());
}

#[tokio::test]
async fn test_create_comment_resyncs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/comment/4"))
        .and(header("authorization", "Bearer tok"))
        .and(body_json(json!({"text": "nice"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9})))
        .expect(1)
        .mount(&server)
        .await;
    mount_empty_list(&server, 1).await;

    let (board, _) = board(&server, Some("tok"));
    board.create_comment(4, "nice").await.unwrap();
}

#[tokio::test]
async fn test_create_comment_without_session() {
    let server = MockServer::start().await;
    let (board, notifier) = board(&server, None);

    assert!(board.create_comment(4, "nice").await.is_err());
    assert_eq!(
        notifier.alerts(),
        vec!["Unable to comment. Are you still logged in?"]
    );
}

#[tokio::test]
async fn test_delete_comment_not_owner() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/comment/9"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let (board, notifier) = board(&server, Some("tok"));
    assert!(board.delete_comment(9).await.is_err());
    assert_eq!(
        notifier.alerts(),
        vec!["Unable to delete. Are you still logged in and the author of the comment?"]
    );
}

#[tokio::test]
async fn test_token_is_read_when_the_mutation_runs() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/comment/9"))
        .and(header("authorization", "Bearer rotated"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    mount_empty_list(&server, 1).await;

    let (board, _) = board(&server, Some("issued"));
    board.session().set("rotated", "alice").unwrap();

    board.delete_comment(9).await.unwrap();
}
