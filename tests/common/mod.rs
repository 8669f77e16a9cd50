#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use yuv::outputs::{Renderer, TranscriptEntry};
use yuv::services::{FetchError, HttpRequest, HttpTransport};

/// Transport that answers by URL prefix and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Vec<(String, Result<String, FetchError>)>,
    calls: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url_prefix: &str, body: &str) -> Self {
        self.routes.push((url_prefix.to_string(), Ok(body.to_string())));
        self
    }

    pub fn fail(mut self, url_prefix: &str, error: FetchError) -> Self {
        self.routes.push((url_prefix.to_string(), Err(error)));
        self
    }

    pub fn calls(&self) -> Vec<HttpRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url_prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.starts_with(url_prefix))
            .count()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, request: &HttpRequest) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(request.clone());
        self.routes
            .iter()
            .find(|(prefix, _)| request.url.starts_with(prefix.as_str()))
            .map(|(_, outcome)| outcome.clone())
            .unwrap_or_else(|| Err(FetchError::Network(format!("no route for {}", request.url))))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    Entry(TranscriptEntry),
    Working,
    Idle,
    Clear,
}

/// Renderer whose event log stays reachable after it is boxed into a session.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub events: Arc<Mutex<Vec<RenderEvent>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, entry: &TranscriptEntry) {
        self.events.lock().unwrap().push(RenderEvent::Entry(entry.clone()));
    }

    fn show_working(&mut self) {
        self.events.lock().unwrap().push(RenderEvent::Working);
    }

    fn hide_working(&mut self) {
        self.events.lock().unwrap().push(RenderEvent::Idle);
    }

    fn clear(&mut self) {
        self.events.lock().unwrap().push(RenderEvent::Clear);
    }
}

pub const SEARCH_API: &str = "https://api.duckduckgo.com/";
pub const WEATHER_API: &str = "https://wttr.in/";
