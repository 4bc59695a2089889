//! Host bridge for the atelier configurator
//!
//! The configurator talks to its hosting page through two messages: the
//! component value (a saved configuration) and the frame height. Commands
//! arrive as JSON lines and are answered the same way.
//!
//! ```ignore
//! let (bridge, host_rx) = ChannelBridge::new();
//! let mut handler = MyHandler::new(bridge);
//! serve_lines(stdin, stdout, &mut handler, Some(host_rx)).await?;
//! ```

pub mod bridge;
pub mod protocol;
pub mod server;

pub use bridge::{BridgeError, ChannelBridge, HostBridge, LineBridge};
pub use protocol::*;
pub use server::{serve_lines, CommandHandler};
