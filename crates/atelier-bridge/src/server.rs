//! Line-oriented command loop

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::bridge::BridgeError;
use crate::protocol::{BridgeResponse, ConfiguratorCommand, HostMessage};

/// Trait that the application implements to handle configurator commands
pub trait CommandHandler: Send {
    fn handle_command(&mut self, cmd: ConfiguratorCommand) -> BridgeResponse;
}

/// Read one JSON command per line from `reader` and answer each on `writer`.
///
/// Host messages queued on `host_rx` while a command runs are written before
/// that command's response. Returns when the reader reaches end of input.
pub async fn serve_lines<R, W, H>(
    reader: R,
    mut writer: W,
    handler: &mut H,
    mut host_rx: Option<mpsc::UnboundedReceiver<HostMessage>>,
) -> Result<(), BridgeError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    H: CommandHandler + ?Sized,
{
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let n = reader.read_line(&mut line).await.inspect_err(|e| {
            log::error!("Command read error: {}", e);
        })?;
        if n == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ConfiguratorCommand>(trimmed) {
            Ok(cmd) => {
                log::debug!("Command: {:?}", cmd);
                handler.handle_command(cmd)
            }
            Err(e) => BridgeResponse::error(format!("Invalid command JSON: {}", e)),
        };

        if let Some(rx) = host_rx.as_mut() {
            while let Ok(message) = rx.try_recv() {
                write_line(&mut writer, &message).await?;
            }
        }
        write_line(&mut writer, &response).await?;
    }

    Ok(())
}

async fn write_line<W, T>(writer: &mut W, value: &T) -> Result<(), BridgeError>
where
    W: AsyncWrite + Unpin,
    T: serde::Serialize,
{
    let mut json = serde_json::to_vec(value)?;
    json.push(b'\n');
    writer.write_all(&json).await?;
    writer.flush().await?;
    Ok(())
}
