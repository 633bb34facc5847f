// Integration tests for the command handler against a mock daemon

use mockito::Matcher;
use serde_json::json;
use taper_remote::cli::{handle_step, handle_trigger, set_level, FileBadge, StepOutcome, Trigger};
use taper_remote::client::{clamp, DaemonClient, DaemonConfig, LevelControl};
use taper_remote::errors::DaemonError;

fn client_for(server: &mockito::ServerGuard) -> DaemonClient {
    DaemonClient::new(DaemonConfig {
        bind_address: server.url(),
        timeout: None,
    })
    .unwrap()
}

fn badge_in(dir: &tempfile::TempDir) -> FileBadge {
    FileBadge::new(dir.path().join("badge"))
}

fn badge_text(badge: &FileBadge) -> String {
    std::fs::read_to_string(badge.path()).unwrap().trim().to_string()
}

#[tokio::test]
async fn test_step_up_pushes_next_level() {
    let mut server = mockito::Server::new_async().await;
    let status = server
        .mock("GET", "/status")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"level": 5, "profile": {"Name": "OK", "Level": 5}}"#)
        .create_async()
        .await;
    let push = server
        .mock("POST", "/level")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"level": 6})))
        .with_status(204)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let badge = badge_in(&dir);
    let outcome = handle_trigger(&client_for(&server), &badge, Trigger::Increase).await;

    assert_eq!(outcome, StepOutcome::Applied(clamp(6)));
    assert_eq!(badge_text(&badge), "6");
    status.assert_async().await;
    push.assert_async().await;
}

#[tokio::test]
async fn test_step_up_at_max_stays_clamped() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/status")
        .with_status(200)
        .with_body(r#"{"level": 10}"#)
        .create_async()
        .await;
    let push = server
        .mock("POST", "/level")
        .match_body(Matcher::Json(json!({"level": 10})))
        .with_status(204)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let badge = badge_in(&dir);
    handle_step(&client_for(&server), &badge, 1).await;

    assert_eq!(badge_text(&badge), "10");
    push.assert_async().await;
}

#[tokio::test]
async fn test_missing_level_defaults_to_ten() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/status")
        .with_status(200)
        .with_body(r#"{"profile": null}"#)
        .create_async()
        .await;
    let push = server
        .mock("POST", "/level")
        .match_body(Matcher::Json(json!({"level": 9})))
        .with_status(204)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let badge = badge_in(&dir);
    handle_trigger(&client_for(&server), &badge, Trigger::Decrease).await;

    assert_eq!(badge_text(&badge), "9");
    push.assert_async().await;
}

#[tokio::test]
async fn test_status_failure_skips_push() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/status")
        .with_status(503)
        .create_async()
        .await;
    let push = server
        .mock("POST", "/level")
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let badge = badge_in(&dir);
    let outcome = handle_step(&client_for(&server), &badge, -1).await;

    assert_eq!(outcome, StepOutcome::Unreachable);
    assert_eq!(badge_text(&badge), "X");
    push.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_daemon_shows_sentinel() {
    // Bind and drop a listener to get a port nothing is serving
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let client = DaemonClient::new(DaemonConfig {
        bind_address: format!("127.0.0.1:{}", port),
        timeout: Some(std::time::Duration::from_secs(2)),
    })
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let badge = badge_in(&dir);
    let outcome = handle_step(&client, &badge, 1).await;

    assert_eq!(outcome, StepOutcome::Unreachable);
    assert_eq!(badge_text(&badge), "X");
}

#[tokio::test]
async fn test_push_rejection_shows_sentinel() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/status")
        .with_status(200)
        .with_body(r#"{"level": 4}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/level")
        .with_status(400)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let badge = badge_in(&dir);
    let outcome = handle_step(&client_for(&server), &badge, 1).await;

    assert_eq!(outcome, StepOutcome::Unreachable);
    assert_eq!(badge_text(&badge), "X");
}

#[tokio::test]
async fn test_set_level_clamps_before_push() {
    let mut server = mockito::Server::new_async().await;
    let status = server
        .mock("GET", "/status")
        .expect(0)
        .create_async()
        .await;
    let push = server
        .mock("POST", "/level")
        .match_body(Matcher::Json(json!({"level": 1})))
        .with_status(204)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let badge = badge_in(&dir);
    set_level(&client_for(&server), &badge, -12).await;

    assert_eq!(badge_text(&badge), "1");
    status.assert_async().await;
    push.assert_async().await;
}

#[tokio::test]
async fn test_fetch_status_error_kinds() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/status")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;
    server
        .mock("POST", "/level")
        .with_status(500)
        .create_async()
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.fetch_status().await,
        Err(DaemonError::StatusFetch { .. })
    ));
    assert!(matches!(
        client.push_level(clamp(3)).await,
        Err(DaemonError::LevelPush { level: 3, .. })
    ));
}
