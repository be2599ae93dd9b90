use std::sync::Arc;

use gatepass_types::AppEvent;
use kanal::AsyncSender;

use crate::display::{describe_providers, describe_status};
use crate::state::AppState;

pub async fn handle_status(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let line = format!(
        "{} {}",
        describe_status(&state.session),
        describe_providers(&state.config)
    );
    app_to_ui_tx.send(AppEvent::Output(line)).await?;
    Ok(())
}

/// Manual retry of the health probe
pub async fn handle_refresh(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("Refreshing translation service");
    state.session.refresh_translation_service().await;
    handle_status(state, app_to_ui_tx).await
}
