use serde::Deserialize;

use super::fallback::{fetch_with_fallback, Provider};
use super::http::{FetchError, HttpRequest, HttpTransport};

/// Served when every joke provider is down.
pub const LOCAL_JOKE: &str =
    "Why did the programmer quit his job? Because he didn't get arrays!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JokeProvider {
    /// `{ setup, punchline }`
    OfficialJokeApi,
    /// `{ joke }` for single jokes, `{ setup, delivery }` for two-parters.
    JokeApi,
    /// `{ joke }`, only returns JSON when asked to.
    ICanHazDadJoke,
}

/// Fixed attempt order.
pub const JOKE_PROVIDERS: [JokeProvider; 3] = [
    JokeProvider::OfficialJokeApi,
    JokeProvider::JokeApi,
    JokeProvider::ICanHazDadJoke,
];

#[derive(Deserialize)]
struct SetupPunchline {
    setup: String,
    punchline: String,
}

#[derive(Deserialize)]
struct JokeApiPayload {
    joke: Option<String>,
    setup: Option<String>,
    delivery: Option<String>,
}

#[derive(Deserialize)]
struct SingleJoke {
    joke: String,
}

fn parse<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))
}

impl JokeProvider {
    pub fn endpoint(&self) -> &'static str {
        match self {
            JokeProvider::OfficialJokeApi => "https://official-joke-api.appspot.com/random_joke",
            JokeProvider::JokeApi => "https://v2.jokeapi.dev/joke/Any?type=single",
            JokeProvider::ICanHazDadJoke => "https://icanhazdadjoke.com/",
        }
    }
}

impl Provider for JokeProvider {
    type Output = String;

    fn name(&self) -> &str {
        match self {
            JokeProvider::OfficialJokeApi => "official-joke-api",
            JokeProvider::JokeApi => "jokeapi",
            JokeProvider::ICanHazDadJoke => "icanhazdadjoke",
        }
    }

    fn request(&self) -> HttpRequest {
        let request = HttpRequest::get(self.endpoint());
        match self {
            JokeProvider::ICanHazDadJoke => request.header("Accept", "application/json"),
            _ => request,
        }
    }

    fn normalize(&self, body: &str) -> Result<String, FetchError> {
        match self {
            JokeProvider::OfficialJokeApi => {
                let p: SetupPunchline = parse(body)?;
                Ok(format!("{} {}", p.setup, p.punchline))
            }
            JokeProvider::JokeApi => {
                let p: JokeApiPayload = parse(body)?;
                match (p.joke, p.setup, p.delivery) {
                    (Some(joke), _, _) if !joke.is_empty() => Ok(joke),
                    (_, Some(setup), Some(delivery)) => Ok(format!("{} {}", setup, delivery)),
                    _ => Err(FetchError::Malformed("no joke or setup/delivery".to_string())),
                }
            }
            JokeProvider::ICanHazDadJoke => {
                let p: SingleJoke = parse(body)?;
                Ok(p.joke)
            }
        }
    }
}

pub async fn fetch_joke(transport: &dyn HttpTransport) -> Result<String, FetchError> {
    fetch_with_fallback(transport, &JOKE_PROVIDERS).await
}
