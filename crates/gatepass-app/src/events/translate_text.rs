use std::sync::Arc;

use gatepass_types::AppEvent;
use kanal::AsyncSender;

use crate::display::{render_text, render_texts};
use crate::state::AppState;

pub async fn handle_text_input(
    state: Arc<AppState>,
    text: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::debug!("Translating {} chars", text.len());

    let rendered = render_text(&state.session, &text).await;
    app_to_ui_tx.send(AppEvent::Output(rendered)).await?;

    Ok(())
}

pub async fn handle_text_batch(
    state: Arc<AppState>,
    texts: Vec<String>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::debug!("Translating batch of {}", texts.len());

    for line in render_texts(&state.session, &texts).await {
        app_to_ui_tx.send(AppEvent::Output(line)).await?;
    }

    Ok(())
}
