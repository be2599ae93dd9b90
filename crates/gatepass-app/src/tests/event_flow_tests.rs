use std::sync::Arc;
use std::time::Duration;

use gatepass_config::Config;
use gatepass_types::{AppEvent, SessionState};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::timeout;

use crate::controller::AppController;
use crate::events::event_loop;
use crate::state::{AppState, build_session};

/// Config with every network provider disabled and storage in `dir`
fn offline_config(dir: &tempfile::TempDir) -> Config {
    let mut config = Config::default();
    config.translator.backend_enabled = false;
    config.translator.mirror_urls.clear();
    config.session.storage_path = dir.path().join("session.json").display().to_string();
    config
}

async fn offline_state(dir: &tempfile::TempDir) -> Arc<AppState> {
    let config = offline_config(dir);
    let session = build_session(&config).await.expect("session");
    Arc::new(AppState::new(config, session))
}

async fn next_output(rx: &AsyncReceiver<AppEvent>) -> String {
    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(AppEvent::Output(line))) => line,
        Ok(Ok(_)) => panic!("Wrong event type"),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - output never arrived!"),
    }
}

async fn send(tx: &AsyncSender<AppEvent>, event: AppEvent) {
    tx.send(event).await.expect("send failed");
}

#[tokio::test]
async fn test_offline_session_flow() {
    let dir = tempfile::tempdir().unwrap();
    let state = offline_state(&dir).await;
    let (cmd_tx, cmd_rx) = kanal::unbounded_async::<AppEvent>();
    let (out_tx, out_rx) = kanal::unbounded_async::<AppEvent>();

    let handle = tokio::spawn(event_loop(state.clone(), cmd_rx, out_tx));

    send(&cmd_tx, AppEvent::Translate("Welcome".to_string())).await;
    assert_eq!(next_output(&out_rx).await, "Welcome");

    // No provider can translate the probe, so the session goes offline
    send(&cmd_tx, AppEvent::ChangeLanguage("am".to_string())).await;
    assert_eq!(next_output(&out_rx).await, "Language: am (offline, dictionary only)");
    assert_eq!(state.session.state(), SessionState::Degraded);

    send(&cmd_tx, AppEvent::Translate("Welcome".to_string())).await;
    assert_eq!(next_output(&out_rx).await, "Welcome [!]");

    send(&cmd_tx, AppEvent::ChangeLanguage("fr".to_string())).await;
    assert_eq!(
        next_output(&out_rx).await,
        "Unsupported language: fr (still using am)"
    );

    send(&cmd_tx, AppEvent::ShowStatus).await;
    let status = next_output(&out_rx).await;
    assert!(status.starts_with("language=am state=offline, dictionary only working=false offline=true"), "{status}");
    assert!(status.ends_with("backend=off mirrors=0 batch_threshold=5"), "{status}");

    send(&cmd_tx, AppEvent::Quit).await;
    let result = timeout(Duration::from_secs(2), handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))), "event loop did not stop on Quit");
}

#[tokio::test]
async fn test_closed_input_still_prints_every_queued_line() {
    let dir = tempfile::tempdir().unwrap();
    let controller = AppController::new(offline_state(&dir).await);

    let (mut input, input_reader) = tokio::io::duplex(1024);
    let (output_writer, mut output) = tokio::io::duplex(64 * 1024);
    let mut tasks = controller.spawn_tasks_with(input_reader, output_writer);

    input
        .write_all(b"lang am\nWelcome\nVisitor Pass\nLogin\n")
        .await
        .unwrap();
    drop(input);

    // Only the event loop stops on its own, after the Quit queued at EOF
    let first = timeout(Duration::from_secs(2), tasks.join_next())
        .await
        .expect("event loop never stopped");
    assert!(matches!(first, Some(Ok(Ok(())))));

    controller.shutdown();
    timeout(Duration::from_secs(2), async {
        while tasks.join_next().await.is_some() {}
    })
    .await
    .expect("tasks did not stop after shutdown");

    let mut printed = String::new();
    output.read_to_string(&mut printed).await.unwrap();
    assert_eq!(
        printed.lines().collect::<Vec<_>>(),
        vec![
            "Language: am (offline, dictionary only)",
            "Welcome [!]",
            "Visitor Pass [!]",
            "Login [!]",
        ]
    );
}

#[tokio::test]
async fn test_batch_outputs_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let state = offline_state(&dir).await;
    let (cmd_tx, cmd_rx) = kanal::unbounded_async::<AppEvent>();
    let (out_tx, out_rx) = kanal::unbounded_async::<AppEvent>();

    tokio::spawn(event_loop(state, cmd_rx, out_tx));

    let texts = vec!["Visit".to_string(), "Notice".to_string(), "Date".to_string()];
    send(&cmd_tx, AppEvent::TranslateMany(texts.clone())).await;

    for text in texts {
        assert_eq!(next_output(&out_rx).await, text);
    }
}

#[tokio::test]
async fn test_persisted_language_is_restored() {
    let dir = tempfile::tempdir().unwrap();
    let config = offline_config(&dir);
    std::fs::write(&config.session.storage_path, r#"{ "language": "am" }"#).unwrap();

    let session = build_session(&config).await.unwrap();

    assert!(session.is_amharic());
    assert!(session.status().offline_mode);
}

#[tokio::test]
async fn test_language_change_is_written_to_storage() {
    let dir = tempfile::tempdir().unwrap();
    let config = offline_config(&dir);
    let session = build_session(&config).await.unwrap();

    session.change_language("am").await.unwrap();

    let stored = std::fs::read_to_string(&config.session.storage_path).unwrap();
    assert!(stored.contains("\"language\": \"am\""), "{stored}");
}

#[tokio::test]
async fn test_tokio_spawn_from_sync_context() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();

    let sync_callback = move || {
        let tx = tx.clone();
        tokio::spawn(async move {
            tx.send(AppEvent::Translate("test".to_string()))
                .await
                .expect("send failed");
        });
    };

    sync_callback();

    let result = timeout(Duration::from_secs(2), rx.recv()).await;

    match result {
        Ok(Ok(AppEvent::Translate(text))) => assert_eq!(text, "test"),
        Ok(Ok(_)) => panic!("Wrong event type"),
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - tokio::spawn from sync context failed!"),
    }
}

#[tokio::test]
async fn test_multiple_spawned_sends() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();

    for i in 0..100 {
        let tx = tx.clone();
        tokio::spawn(async move {
            tx.send(AppEvent::Translate(format!("msg{}", i)))
                .await
                .expect("send failed");
        });
    }

    let mut count = 0;
    let result = timeout(Duration::from_secs(2), async {
        while count < 100 {
            rx.recv().await.expect("recv failed");
            count += 1;
        }
    })
    .await;

    assert!(result.is_ok(), "Timeout waiting for events!");
    assert_eq!(count, 100);
}
