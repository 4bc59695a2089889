//! Outgoing host messages

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tokio::sync::mpsc;

use crate::protocol::HostMessage;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("host channel closed")]
    Closed,
}

/// Where the configurator's host-facing messages are delivered
pub trait HostBridge: Send + Sync {
    fn post(&self, message: HostMessage) -> Result<(), BridgeError>;

    /// Report the component's value (a saved configuration)
    fn emit_value(&self, value: serde_json::Value) -> Result<(), BridgeError> {
        self.post(HostMessage::SetComponentValue { value })
    }

    /// Ask the host to resize the frame
    fn emit_height(&self, height: u32) -> Result<(), BridgeError> {
        self.post(HostMessage::SetFrameHeight { height })
    }
}

/// Queues host messages for a consumer task (see [`crate::serve_lines`])
#[derive(Clone, Debug)]
pub struct ChannelBridge {
    tx: mpsc::UnboundedSender<HostMessage>,
}

impl ChannelBridge {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<HostMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl HostBridge for ChannelBridge {
    fn post(&self, message: HostMessage) -> Result<(), BridgeError> {
        self.tx.send(message).map_err(|_| BridgeError::Closed)
    }
}

/// Writes each host message as one JSON line
#[derive(Debug)]
pub struct LineBridge<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> LineBridge<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> HostBridge for LineBridge<W> {
    fn post(&self, message: HostMessage) -> Result<(), BridgeError> {
        let mut line = serde_json::to_vec(&message)?;
        line.push(b'\n');
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(&line)?;
        writer.flush()?;
        Ok(())
    }
}
