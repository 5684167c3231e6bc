//! Transport implementations

pub mod callback;
pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod memory;

pub use callback::{AsyncCallback, CallbackTransport, CallbackTransportBuilder, SyncCallback};
pub use console::{ConsoleChannel, ConsoleTransport};
#[cfg(feature = "file")]
pub use file::FileTransport;
pub use memory::MemoryTransport;

pub use crate::core::Transport;
