pub mod classifier;
pub mod types;

pub use classifier::{classify, sanitize_expression};
pub use types::{Intent, IntentKind};
