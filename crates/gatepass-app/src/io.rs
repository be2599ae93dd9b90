use gatepass_types::AppEvent;
use kanal::AsyncSender;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio_util::sync::CancellationToken;

/// Turn one input line into an event. Blank lines are ignored.
pub fn parse_command(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let event = match command {
        "lang" | "language" if !rest.is_empty() => AppEvent::ChangeLanguage(rest.to_string()),
        "refresh" if rest.is_empty() => AppEvent::RefreshTranslation,
        "status" if rest.is_empty() => AppEvent::ShowStatus,
        "quit" | "exit" if rest.is_empty() => AppEvent::Quit,
        "batch" if !rest.is_empty() => AppEvent::TranslateMany(
            rest.split('|')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => AppEvent::Translate(line.to_string()),
    };

    Some(event)
}

/// Read commands from `input` until EOF or cancellation.
///
/// EOF only queues a `Quit`; the watcher then idles until shutdown so the
/// event loop's exit is what stops the app.
pub async fn watcher_io<R>(
    input: R,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(input).lines();

    tracing::info!("Reading commands");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if let Some(event) = parse_command(&line) {
                            event_tx.send(event).await?;
                        }
                    }
                    None => {
                        tracing::info!("Input closed");
                        event_tx.send(AppEvent::Quit).await?;
                        cancel.cancelled().await;
                        break;
                    }
                }
            }
            _ = cancel.cancelled() => {
                tracing::info!("Input watcher stopping");
                break;
            }
        }
    }

    Ok(())
}
