use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use super::calc;
use super::event::{Feature, OutboundMessage};
use super::intent::{classify, Intent};
use crate::config::EndpointConfig;
use crate::error::Result;
use crate::memory::{
    append_to_list, read_list, KeyValueStore, UserProfile, TODO_LIST, USER_NOTES,
};
use crate::services::http::HttpTransport;
use crate::services::joke::{fetch_joke, LOCAL_JOKE};
use crate::services::search::{search, search_page_url, SearchResult};
use crate::services::weather::{current_conditions, weather_page_url};

pub const APOLOGY: &str = "Sorry, I encountered an error while processing your request. Please try again.";
pub const FEATURE_APOLOGY: &str = "Sorry, I encountered an error processing your request. Please try again.";

const THANKS_REPLIES: [&str; 3] = [
    "You're welcome! Is there anything else I can help with?",
    "My pleasure! Let me know if you need anything else.",
    "Happy to help! Don't hesitate to ask if you have more questions.",
];

/// Greeting templates, addressed to the user when a name is stored.
pub fn greeting_replies(name: Option<&str>) -> [String; 3] {
    let suffix = name.map(|n| format!(" {}", n)).unwrap_or_default();
    [
        format!("Hi there{}! How can I help you today?", suffix),
        format!("Hello{}! What can I do for you?", suffix),
        format!("Greetings{}! How may I assist you?", suffix),
    ]
}

pub fn thanks_replies() -> [&'static str; 3] {
    THANKS_REPLIES
}

/// Formats evaluator output. Negative zero prints as "0".
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

fn calculate(expression: &str) -> Result<String> {
    let value = calc::evaluate(expression)?;
    Ok(format_number(value))
}

/// Routes classified input to its handler and produces replies.
///
/// Owns the storage and transport collaborators for the lifetime of a session.
pub struct Dispatcher {
    store: Box<dyn KeyValueStore>,
    transport: Arc<dyn HttpTransport>,
    endpoints: EndpointConfig,
    rng: StdRng,
}

impl Dispatcher {
    pub fn new(
        store: Box<dyn KeyValueStore>,
        transport: Arc<dyn HttpTransport>,
        endpoints: EndpointConfig,
    ) -> Self {
        Self {
            store,
            transport,
            endpoints,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic template choice.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn KeyValueStore {
        self.store.as_mut()
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile::load(self.store.as_ref())
    }

    /// Classifies and answers one submission. Never returns an empty list and
    /// never surfaces an error: failures become an apology.
    pub async fn handle(&mut self, raw: &str) -> Vec<OutboundMessage> {
        let text = raw.trim();
        let intent = classify(text);
        debug!(kind = ?intent.kind(), "Classified input");

        match self.route(text, intent).await {
            Ok(replies) if !replies.is_empty() => replies,
            Ok(_) => {
                warn!("Handler produced no reply");
                vec![OutboundMessage::text(APOLOGY)]
            }
            Err(e) => {
                error!("Handler failed: {}", e);
                vec![OutboundMessage::text(APOLOGY)]
            }
        }
    }

    async fn route(&mut self, text: &str, intent: Intent) -> Result<Vec<OutboundMessage>> {
        match intent {
            Intent::Greeting => {
                let name = self.profile().name;
                let replies = greeting_replies(name.as_deref());
                let reply = replies.choose(&mut self.rng).cloned().unwrap_or_default();
                Ok(vec![OutboundMessage::text(reply)])
            }
            Intent::Thanks => {
                let reply = THANKS_REPLIES.choose(&mut self.rng).copied().unwrap_or_default();
                Ok(vec![OutboundMessage::text(reply)])
            }
            Intent::Arithmetic { expression } => match calculate(&expression) {
                Ok(value) => Ok(vec![OutboundMessage::text(format!(
                    "The result of {} is: {}",
                    text, value
                ))]),
                Err(e) => {
                    debug!("Evaluation of '{}' failed ({}), searching instead", expression, e);
                    Ok(self.web_query(text).await)
                }
            },
            Intent::TodoAdd { task } => {
                append_to_list(self.store.as_mut(), TODO_LIST, &task)?;
                info!("Todo item added");
                Ok(vec![OutboundMessage::text(format!(
                    "✅ Added to your to-do list: \"{}\"",
                    task
                ))])
            }
            Intent::NotesAdd { note } => {
                append_to_list(self.store.as_mut(), USER_NOTES, &note)?;
                info!("Note added");
                Ok(vec![OutboundMessage::text(format!(
                    "📝 Added to your notes: \"{}\"",
                    note
                ))])
            }
            Intent::Reminder { reminder } => Ok(vec![OutboundMessage::text(format!(
                "⏰ I'll remind you to {} (Note: reminders are not scheduled yet, so this is only an acknowledgement)",
                reminder
            ))]),
            Intent::WebQuery { query } => Ok(self.web_query(&query).await),
        }
    }

    async fn web_query(&self, query: &str) -> Vec<OutboundMessage> {
        let results = search(self.transport.as_ref(), &self.endpoints, query).await;
        compose_search_replies(query, &results, &self.endpoints.search_page)
    }

    /// Shortcut actions. Same error policy as `handle`.
    pub async fn handle_feature(&mut self, feature: Feature) -> Vec<OutboundMessage> {
        match self.run_feature(feature).await {
            Ok(replies) => replies,
            Err(e) => {
                error!("Feature {:?} failed: {}", feature, e);
                vec![OutboundMessage::text(FEATURE_APOLOGY)]
            }
        }
    }

    async fn run_feature(&mut self, feature: Feature) -> Result<Vec<OutboundMessage>> {
        let reply = match feature {
            Feature::Weather => self.weather().await,
            Feature::Joke => match self.joke().await {
                Ok(joke) => joke,
                Err(e) => {
                    warn!("Joke fetch failed: {}", e);
                    format!("I couldn't fetch a joke right now. How about this: {}", LOCAL_JOKE)
                }
            },
            Feature::Todo => {
                let items = read_list(self.store.as_ref(), TODO_LIST)?;
                numbered_list(
                    "Here's your to-do list:",
                    &items,
                    "Your to-do list is empty. Add a task by typing: 'add to my todo: Your task here'",
                )
            }
            Feature::Notes => {
                let items = read_list(self.store.as_ref(), USER_NOTES)?;
                numbered_list(
                    "Here are your notes:",
                    &items,
                    "You don't have any notes saved yet. Add one by typing: 'add to my notes: Your note here'",
                )
            }
            Feature::Reminder => {
                "What would you like me to remind you about? (Example: 'Remind me to call mom at 5pm')"
                    .to_string()
            }
            Feature::Calculator => "Enter a math expression to calculate (Example: '5 + 3 * 2' or 'sqrt(16)'). I can handle:\n\
                 - Basic operations: +, -, *, /, %\n\
                 - Exponents: ^ or **\n\
                 - Square roots: sqrt()\n\
                 - Trigonometric functions: sin(), cos(), tan()"
                .to_string(),
        };
        Ok(vec![OutboundMessage::text(reply)])
    }

    async fn weather(&self) -> String {
        let Some(location) = self.profile().location else {
            return "Please set your location in your profile first.".to_string();
        };

        match self.weather_report(&location).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Weather fetch failed: {}", e);
                format!(
                    "I couldn't fetch weather data. Try checking here: {}",
                    weather_page_url(&self.endpoints.weather, &location)
                )
            }
        }
    }

    async fn weather_report(&self, location: &str) -> Result<String> {
        let conditions =
            current_conditions(self.transport.as_ref(), &self.endpoints, location).await?;
        Ok(format!("Current weather in {}: {}", location, conditions))
    }

    async fn joke(&self) -> Result<String> {
        Ok(fetch_joke(self.transport.as_ref()).await?)
    }

    /// Stores the profile and confirms. Empty fields are cleared.
    pub fn save_profile(&mut self, profile: &UserProfile) -> OutboundMessage {
        if let Err(e) = profile.save(self.store.as_mut()) {
            error!("Saving profile failed: {}", e);
            return OutboundMessage::text(APOLOGY);
        }

        match self.profile().name {
            Some(name) => OutboundMessage::text(format!(
                "Information saved, {}! I'll remember this for our conversations.",
                name
            )),
            None => OutboundMessage::text("Information saved! I'll remember this for our conversations."),
        }
    }

    pub fn welcome(&self) -> OutboundMessage {
        match self.profile().name {
            Some(name) => OutboundMessage::text(format!(
                "Hello {}! I'm Yuv, your personal assistant. How can I help you today?",
                name
            )),
            None => OutboundMessage::text(
                "Hello! I'm Yuv, your personal assistant. How can I help you today?",
            ),
        }
    }
}

fn numbered_list(heading: &str, items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    let mut out = heading.to_string();
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("\n{}. {}", i + 1, item));
    }
    out
}

/// Turns ranked search results into replies: the top result as the primary
/// card, plus one "additional" card whose snippet does not overlap it.
///
/// Overlap is plain substring containment in either direction.
pub fn compose_search_replies(
    query: &str,
    results: &[SearchResult],
    search_page: &str,
) -> Vec<OutboundMessage> {
    let Some(main) = results.first() else {
        return vec![OutboundMessage::text(format!(
            "I couldn't find specific results for \"{}\". Try searching directly: {}",
            query,
            search_page_url(search_page, query)
        ))];
    };

    let heading = if main.title.contains("Definition") {
        format!("Definition of {}:", query)
    } else if main.title == query || main.title.contains(query) {
        format!("About {}:", query)
    } else {
        "Here's what I found:".to_string()
    };

    let mut replies = vec![OutboundMessage::with_card(heading, main.clone())];

    let additional = results[1..].iter().find(|r| {
        !r.snippet.contains(main.snippet.as_str()) && !main.snippet.contains(r.snippet.as_str())
    });
    if let Some(extra) = additional {
        replies.push(OutboundMessage::with_card("Additional information:", extra.clone()));
    }

    replies
}
