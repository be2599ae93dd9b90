use std::sync::Arc;

use gatepass_types::AppEvent;
use kanal::AsyncSender;

use crate::display::describe_state;
use crate::state::AppState;

pub async fn handle_language_change(
    state: Arc<AppState>,
    code: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let message = match state.session.change_language(&code).await {
        Ok(session_state) => format!(
            "Language: {} ({})",
            state.session.current_language(),
            describe_state(session_state)
        ),
        Err(e) => {
            // Invalid codes are a diagnostic, the session keeps going
            format!("{} (still using {})", e, state.session.current_language())
        }
    };

    app_to_ui_tx.send(AppEvent::Output(message)).await?;
    Ok(())
}
