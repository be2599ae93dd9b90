use std::sync::Arc;

use gatepass_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};

use crate::state::AppState;

pub mod change_language;
pub mod show_status;
pub mod translate_text;

use change_language::handle_language_change;
use show_status::{handle_refresh, handle_status};
use translate_text::{handle_text_batch, handle_text_input};

/// App's main loop. Returns when a `Quit` event arrives.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = ui_to_app_rx.recv().await?;

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", std::mem::discriminant(&event));

        if matches!(event, AppEvent::Quit) {
            tracing::info!("[EVENT_LOOP] Quit requested");
            return Ok(());
        }

        handle_events(state.clone(), &app_to_ui_tx, event).await?;
    }
}

async fn handle_events(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::ChangeLanguage(code) => {
            handle_language_change(state, code, app_to_ui_tx).await?;
        }
        AppEvent::Translate(text) => {
            handle_text_input(state, text, app_to_ui_tx).await?;
        }
        AppEvent::TranslateMany(texts) => {
            handle_text_batch(state, texts, app_to_ui_tx).await?;
        }
        AppEvent::RefreshTranslation => {
            handle_refresh(state, app_to_ui_tx).await?;
        }
        AppEvent::ShowStatus => {
            handle_status(state, app_to_ui_tx).await?;
        }
        AppEvent::Output(_) => {
            // UI-only event, ignore in backend
        }
        AppEvent::Quit => {}
    }

    Ok(())
}
