use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::types::Intent;
use crate::kernel::calc;

static GREETING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)hello|hi|hey|greetings").expect("greeting regex is valid")
});
static THANKS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)thanks|thank you|appreciate").expect("thanks regex is valid")
});
static MATH_HINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\d+\-*/().%^]").expect("math hint regex is valid")
});
static MATH_KEEP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:sqrt|sin|cos|tan)\s*\(|[0-9+\-*/().%^]").expect("math keep regex is valid")
});
static TODO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^add to my todo( list)?:").expect("todo regex is valid")
});
static NOTES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^add to my notes:").expect("notes regex is valid")
});
static REMINDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^remind me to").expect("reminder regex is valid")
});

/// Classifies free text into exactly one intent.
///
/// Rules run in fixed priority order and the first match wins; anything left
/// over is a web query. Pure: no I/O, no state.
pub fn classify(text: &str) -> Intent {
    let text = text.trim();

    if GREETING_RE.is_match(text) {
        return Intent::Greeting;
    }

    if THANKS_RE.is_match(text) {
        return Intent::Thanks;
    }

    if let Some(expression) = arithmetic_payload(text) {
        return Intent::Arithmetic { expression };
    }

    if let Some(task) = strip_trigger(&TODO_RE, text) {
        return Intent::TodoAdd { task };
    }

    if let Some(note) = strip_trigger(&NOTES_RE, text) {
        return Intent::NotesAdd { note };
    }

    if let Some(reminder) = strip_trigger(&REMINDER_RE, text) {
        return Intent::Reminder { reminder };
    }

    Intent::WebQuery { query: text.to_string() }
}

/// Reduces `text` to the characters the evaluator understands.
/// Function names survive only when called. `**` is normalized to `^`.
pub fn sanitize_expression(text: &str) -> String {
    MATH_KEEP_RE
        .find_iter(text)
        .flat_map(|m| m.as_str().chars())
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect::<String>()
        .replace("**", "^")
}

/// Returns the sanitized expression when `text` looks like arithmetic and the
/// result actually parses into an operation. Anything else falls through.
fn arithmetic_payload(text: &str) -> Option<String> {
    if !MATH_HINT_RE.is_match(text) {
        return None;
    }

    let expression = sanitize_expression(text);
    match calc::parse(&expression) {
        Ok(expr) if !expr.is_literal() => Some(expression),
        Ok(_) => {
            debug!("Bare number in input, not arithmetic");
            None
        }
        Err(e) => {
            debug!("Math-like input did not parse: {}", e);
            None
        }
    }
}

fn strip_trigger(re: &Regex, text: &str) -> Option<String> {
    re.find(text).map(|m| text[m.end()..].trim().to_string())
}
