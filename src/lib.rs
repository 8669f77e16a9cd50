pub mod config;
pub mod error;
pub mod kernel;
pub mod memory;
pub mod outputs;
pub mod services;

// Re-export specific items for convenient access
pub use kernel::dispatcher::Dispatcher;
pub use kernel::intent::{classify, Intent};
pub use kernel::session::{Command, Session};
