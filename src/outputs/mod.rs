pub mod render;
pub mod transcript;

pub use render::{ConsoleRenderer, Renderer, WorkingIndicator};
pub use transcript::{Speaker, Transcript, TranscriptEntry};
