use gatepass_types::AppEvent;
use kanal::AsyncReceiver;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tokio_util::sync::CancellationToken;

/// Write app output lines to `output`; logs stay on stderr
pub async fn ui_loop<W>(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
    output: W,
) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut stdout = BufWriter::new(output);

    loop {
        tokio::select! {
            event = app_to_ui_rx.recv() => {
                if let AppEvent::Output(line) = event? {
                    stdout.write_all(line.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
            }
            _ = cancel.cancelled() => {
                // Flush whatever was queued before shutdown
                while let Ok(Some(event)) = app_to_ui_rx.try_recv() {
                    if let AppEvent::Output(line) = event {
                        stdout.write_all(line.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                    }
                }
                stdout.flush().await?;
                tracing::debug!("Output loop stopping");
                break;
            }
        }
    }

    stdout.shutdown().await?;
    Ok(())
}
