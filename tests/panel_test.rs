// Integration tests for the interactive panel against a mock daemon

use mockito::Matcher;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use taper_remote::cli::tui::{PanelInput, PanelSession};
use taper_remote::cli::{PanelAction, PanelState, NO_DAEMON_LABEL};
use taper_remote::client::{clamp, DaemonClient, DaemonConfig, LevelControl};

fn client_for(server: &mockito::ServerGuard) -> Arc<dyn LevelControl> {
    Arc::new(
        DaemonClient::new(DaemonConfig {
            bind_address: server.url(),
            timeout: None,
        })
        .unwrap(),
    )
}

async fn status_mock(server: &mut mockito::ServerGuard, body: &str) -> mockito::Mock {
    server
        .mock("GET", "/status")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_open_synced() {
    let mut server = mockito::Server::new_async().await;
    status_mock(&mut server, r#"{"level": 3}"#).await;

    let session = PanelSession::open(client_for(&server)).await;

    assert_eq!(session.panel().state(), PanelState::Synced);
    assert_eq!(session.panel().label(), "3");
    assert_eq!(session.panel().slider(), Some(clamp(3)));
    assert!(session.panel().controls_enabled());
}

#[tokio::test]
async fn test_open_disconnected_controls_inert() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/status")
        .with_status(500)
        .create_async()
        .await;
    let push = server
        .mock("POST", "/level")
        .expect(0)
        .create_async()
        .await;

    let mut session = PanelSession::open(client_for(&server)).await;
    assert_eq!(session.panel().state(), PanelState::Disconnected);
    assert_eq!(session.panel().label(), NO_DAEMON_LABEL);

    assert!(session.handle(PanelInput::Control(PanelAction::Increment)));
    assert!(session.handle(PanelInput::Control(PanelAction::Decrement)));
    assert!(session.handle(PanelInput::Control(PanelAction::SliderMoved(5))));
    assert!(session.handle(PanelInput::EntryDigit('4')));
    assert!(session.handle(PanelInput::EntrySubmit));

    assert_eq!(session.pending_pushes(), 0);
    assert_eq!(session.panel().label(), NO_DAEMON_LABEL);
    session.drain(Duration::from_secs(1)).await;
    push.assert_async().await;
}

#[tokio::test]
async fn test_increment_pushes_and_updates_display() {
    let mut server = mockito::Server::new_async().await;
    status_mock(&mut server, r#"{"level": 5}"#).await;
    let push = server
        .mock("POST", "/level")
        .match_body(Matcher::Json(json!({"level": 6})))
        .with_status(204)
        .create_async()
        .await;

    let mut session = PanelSession::open(client_for(&server)).await;
    session.handle(PanelInput::Control(PanelAction::Increment));

    // Display updates before the push resolves
    assert_eq!(session.panel().label(), "6");
    assert_eq!(session.panel().slider(), Some(clamp(6)));

    session.drain(Duration::from_secs(5)).await;
    push.assert_async().await;
}

#[tokio::test]
async fn test_slider_and_entry_clamp() {
    let mut server = mockito::Server::new_async().await;
    status_mock(&mut server, r#"{"level": 9}"#).await;
    let push_max = server
        .mock("POST", "/level")
        .match_body(Matcher::Json(json!({"level": 10})))
        .with_status(204)
        .expect(2)
        .create_async()
        .await;
    let push_min = server
        .mock("POST", "/level")
        .match_body(Matcher::Json(json!({"level": 1})))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let mut session = PanelSession::open(client_for(&server)).await;
    session.handle(PanelInput::Nudge(3));
    assert_eq!(session.panel().label(), "10");

    session.handle(PanelInput::Nudge(-20));
    assert_eq!(session.panel().label(), "1");

    for digit in ['4', '2'] {
        session.handle(PanelInput::EntryDigit(digit));
    }
    assert_eq!(session.entry(), "42");
    session.handle(PanelInput::EntrySubmit);
    assert_eq!(session.entry(), "");
    assert_eq!(session.panel().label(), "10");

    session.drain(Duration::from_secs(5)).await;
    push_max.assert_async().await;
    push_min.assert_async().await;
}

#[tokio::test]
async fn test_slider_at_current_level_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    status_mock(&mut server, r#"{"level": 10}"#).await;
    let push = server
        .mock("POST", "/level")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let mut session = PanelSession::open(client_for(&server)).await;
    session.handle(PanelInput::Control(PanelAction::SliderMoved(10)));
    session.handle(PanelInput::Nudge(1));
    session.handle(PanelInput::Control(PanelAction::SliderMoved(25)));
    assert_eq!(session.pending_pushes(), 0);

    // Buttons still write even when the level does not change
    session.handle(PanelInput::Control(PanelAction::Increment));
    assert_eq!(session.panel().label(), "10");

    session.drain(Duration::from_secs(5)).await;
    push.assert_async().await;
}

#[tokio::test]
async fn test_finished_pushes_are_reaped_while_open() {
    let mut server = mockito::Server::new_async().await;
    status_mock(&mut server, r#"{"level": 5}"#).await;
    let push = server
        .mock("POST", "/level")
        .with_status(204)
        .expect(200)
        .create_async()
        .await;

    let mut session = PanelSession::open(client_for(&server)).await;
    for i in 0..200 {
        let action = if i % 2 == 0 {
            PanelAction::Increment
        } else {
            PanelAction::Decrement
        };
        session.handle(PanelInput::Control(action));
    }

    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while session.pending_pushes() > 0 && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(session.pending_pushes(), 0);
    assert_eq!(session.panel().label(), "5");
    push.assert_async().await;
}

#[tokio::test]
async fn test_push_failure_keeps_optimistic_display() {
    let mut server = mockito::Server::new_async().await;
    status_mock(&mut server, r#"{"level": 2}"#).await;
    let push = server
        .mock("POST", "/level")
        .match_body(Matcher::Json(json!({"level": 1})))
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let mut session = PanelSession::open(client_for(&server)).await;
    session.handle(PanelInput::Control(PanelAction::Decrement));
    session.drain(Duration::from_secs(5)).await;
    push.assert_async().await;

    assert_eq!(session.panel().state(), PanelState::Synced);
    assert_eq!(session.panel().label(), "1");
    assert!(session.panel().controls_enabled());
}

#[tokio::test]
async fn test_quit_closes_panel() {
    let mut server = mockito::Server::new_async().await;
    status_mock(&mut server, r#"{"level": 7}"#).await;

    let mut session = PanelSession::open(client_for(&server)).await;
    assert!(!session.handle(PanelInput::Quit));
}
