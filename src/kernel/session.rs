use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::dispatcher::Dispatcher;
use super::event::{Feature, OutboundMessage};
use crate::memory::UserProfile;
use crate::outputs::{Renderer, Transcript, TranscriptEntry, WorkingIndicator};

pub const HELP_TEXT: &str = "Things you can ask me:\n\
    - Say hello, or thank me\n\
    - Math: '5 + 3 * 2', 'sqrt(16)', '2 ^ 10'\n\
    - 'add to my todo: buy milk' / 'add to my notes: idea'\n\
    - 'remind me to call mom at 5pm'\n\
    - Anything else is looked up on the web\n\
    Commands: /weather /joke /todo /notes /reminder /calc\n\
    /profile <name> | <location>   /clear   /help   /quit";

/// Everything the front end can ask of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Say(String),
    Feature(Feature),
    SaveProfile(UserProfile),
    Clear,
    Help,
    Quit,
}

impl Command {
    /// Slash-prefixed lines are commands, everything else is chat.
    /// Returns `None` for blank input and unknown commands.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let Some(rest) = line.strip_prefix('/') else {
            return Some(Command::Say(line.to_string()));
        };

        let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        match name.to_ascii_lowercase().as_str() {
            "clear" => Some(Command::Clear),
            "help" => Some(Command::Help),
            "quit" | "exit" => Some(Command::Quit),
            "profile" => {
                let (name, location) = args.split_once('|').unwrap_or((args, ""));
                let field = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty());
                Some(Command::SaveProfile(UserProfile {
                    name: field(name),
                    location: field(location),
                }))
            }
            other => Feature::from_name(other).map(Command::Feature),
        }
    }
}

/// One conversation: the dispatcher, the rendering surface and the transcript.
///
/// Submissions are processed strictly one after another; the working
/// indicator brackets every call that may touch the network.
pub struct Session {
    dispatcher: Dispatcher,
    renderer: Box<dyn Renderer>,
    transcript: Transcript,
}

impl Session {
    pub fn new(dispatcher: Dispatcher, renderer: Box<dyn Renderer>) -> Self {
        let transcript = Transcript::load(dispatcher.store());
        Self {
            dispatcher,
            renderer,
            transcript,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Replays a stored conversation, or greets when there is none.
    pub fn start(&mut self) {
        if self.transcript.is_empty() {
            let welcome = self.dispatcher.welcome();
            self.emit(&welcome);
        } else {
            debug!("Replaying {} transcript entries", self.transcript.entries().len());
            for entry in self.transcript.entries() {
                self.renderer.render(entry);
            }
        }
    }

    /// Handles one chat line. Blank input is ignored.
    pub async fn submit(&mut self, raw: &str) -> Vec<OutboundMessage> {
        let text = raw.trim();
        if text.is_empty() {
            return Vec::new();
        }

        self.record(TranscriptEntry::user(text));

        let replies = {
            let _working = WorkingIndicator::enter(self.renderer.as_mut());
            self.dispatcher.handle(text).await
        };

        for reply in &replies {
            self.emit(reply);
        }
        replies
    }

    pub async fn feature(&mut self, feature: Feature) -> Vec<OutboundMessage> {
        let replies = {
            let _working = WorkingIndicator::enter(self.renderer.as_mut());
            self.dispatcher.handle_feature(feature).await
        };

        for reply in &replies {
            self.emit(reply);
        }
        replies
    }

    pub fn save_profile(&mut self, profile: &UserProfile) -> OutboundMessage {
        let reply = self.dispatcher.save_profile(profile);
        self.emit(&reply);
        reply
    }

    pub fn clear(&mut self) -> OutboundMessage {
        self.transcript.clear();
        self.renderer.clear();
        let reply = OutboundMessage::text("Conversation cleared. How can I assist you now?");
        self.emit(&reply);
        reply
    }

    pub fn help(&mut self) -> OutboundMessage {
        let reply = OutboundMessage::text(HELP_TEXT);
        self.emit(&reply);
        reply
    }

    /// Drains commands until `Quit` or the sender goes away. Commands queue
    /// behind the one in flight.
    pub async fn run(&mut self, mut commands: mpsc::Receiver<Command>) {
        while let Some(command) = commands.recv().await {
            match command {
                Command::Say(text) => {
                    self.submit(&text).await;
                }
                Command::Feature(feature) => {
                    self.feature(feature).await;
                }
                Command::SaveProfile(profile) => {
                    self.save_profile(&profile);
                }
                Command::Clear => {
                    self.clear();
                }
                Command::Help => {
                    self.help();
                }
                Command::Quit => break,
            }
        }
        info!("Session ended");
    }

    fn emit(&mut self, message: &OutboundMessage) {
        self.record(TranscriptEntry::assistant(message));
    }

    fn record(&mut self, entry: TranscriptEntry) {
        self.renderer.render(&entry);
        self.transcript.push(entry);
        if let Err(e) = self.transcript.save(self.dispatcher.store_mut()) {
            warn!("Could not persist chat history: {}", e);
        }
    }
}
