use std::io::Write;

use super::transcript::{Speaker, TranscriptEntry};

/// Presentation surface for the conversation.
pub trait Renderer: Send {
    fn render(&mut self, entry: &TranscriptEntry);
    fn show_working(&mut self);
    fn hide_working(&mut self);
    fn clear(&mut self);
}

/// Keeps the "working" indicator up for as long as the guard lives.
/// Dropping it (normal return, `?`, or unwinding) always takes it down.
pub struct WorkingIndicator<'a> {
    renderer: &'a mut dyn Renderer,
}

impl<'a> WorkingIndicator<'a> {
    pub fn enter(renderer: &'a mut dyn Renderer) -> Self {
        renderer.show_working();
        Self { renderer }
    }
}

impl Drop for WorkingIndicator<'_> {
    fn drop(&mut self) {
        self.renderer.hide_working();
    }
}

/// Plain terminal output.
#[derive(Debug, Default)]
pub struct ConsoleRenderer {
    working: bool,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Renderer for ConsoleRenderer {
    fn render(&mut self, entry: &TranscriptEntry) {
        let who = match entry.speaker {
            Speaker::User => "you",
            Speaker::Assistant => "yuv",
        };
        println!("[{}] {}: {}", entry.at, who, entry.text);

        if let Some(card) = &entry.card {
            println!("    ┌ {}", card.title);
            println!("    │ {}", card.snippet);
            println!("    └ {}", card.link);
        }
    }

    fn show_working(&mut self) {
        if !self.working {
            self.working = true;
            eprint!("yuv is typing...");
            let _ = std::io::stderr().flush();
        }
    }

    fn hide_working(&mut self) {
        if self.working {
            self.working = false;
            // Carriage return + erase line.
            eprint!("\r\x1b[K");
            let _ = std::io::stderr().flush();
        }
    }

    fn clear(&mut self) {
        print!("\x1b[2J\x1b[H");
        let _ = std::io::stdout().flush();
    }
}
