mod common;

use common::{ScriptedTransport, SEARCH_API};
use yuv::config::EndpointConfig;
use yuv::services::search::{search, InstantAnswerProvider, SearchResult, MAX_RESULTS};
use yuv::services::{FetchError, Provider};

fn provider(query: &str) -> InstantAnswerProvider {
    InstantAnswerProvider::new(&EndpointConfig::default(), query)
}

#[test]
fn test_abstract_only() {
    let body = r#"{
        "AbstractText": "Rust is a multi-paradigm programming language.",
        "Heading": "Rust (programming language)",
        "AbstractURL": "https://en.wikipedia.org/wiki/Rust_(programming_language)",
        "RelatedTopics": [],
        "Results": [],
        "Definition": ""
    }"#;

    let results = provider("rust").normalize(body).unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].link, "https://en.wikipedia.org/wiki/Rust_(programming_language)");
    assert_eq!(results[0].title, "Rust (programming language)");
    assert_eq!(results[0].snippet, "Rust is a multi-paradigm programming language.");
}

#[test]
fn test_abstract_defaults() {
    let body = r#"{"AbstractText": "Some text", "Heading": "", "AbstractURL": ""}"#;

    let results = provider("rust lang").normalize(body).unwrap();

    assert_eq!(results[0].title, "rust lang", "Empty heading falls back to the query");
    assert_eq!(results[0].link, "https://duckduckgo.com/?q=rust%20lang");
}

#[test]
fn test_sections_in_order_and_truncated() {
    let body = r#"{
        "AbstractText": "Abstract snippet",
        "Heading": "Heading",
        "AbstractURL": "https://a.test/",
        "RelatedTopics": [
            {"FirstURL": "https://r1.test/", "Text": "Topic one - first related"},
            {"Name": "Category", "Topics": [{"FirstURL": "https://nested.test/", "Text": "nested"}]},
            {"FirstURL": "https://r2.test/", "Text": "Topic two - second related"},
            {"FirstURL": "https://r3.test/", "Text": "Topic three"}
        ],
        "Results": [{"FirstURL": "https://res.test/", "Text": "Official site"}],
        "Definition": "A definition",
        "DefinitionURL": "https://def.test/"
    }"#;

    let results = provider("rust").normalize(body).unwrap();

    assert_eq!(results.len(), MAX_RESULTS);
    let links: Vec<&str> = results.iter().map(|r| r.link.as_str()).collect();
    assert_eq!(links, vec!["https://a.test/", "https://r1.test/", "https://r2.test/"]);
    assert_eq!(results[1].title, "Topic one", "Title is the text before ' - '");
    assert_eq!(results[1].snippet, "Topic one - first related");
}

#[test]
fn test_results_and_definition_sections() {
    let body = r#"{
        "RelatedTopics": [{"FirstURL": "", "Text": "missing link"}],
        "Results": [{"FirstURL": "https://res.test/", "Text": "Official site"}],
        "Definition": "A definition",
        "DefinitionURL": "https://def.test/"
    }"#;

    let results = provider("rust").normalize(body).unwrap();

    assert_eq!(
        results,
        vec![
            SearchResult {
                title: "Official site".to_string(),
                snippet: "Official site".to_string(),
                link: "https://res.test/".to_string(),
            },
            SearchResult {
                title: "rust - Definition".to_string(),
                snippet: "A definition".to_string(),
                link: "https://def.test/".to_string(),
            },
        ]
    );
}

#[test]
fn test_definition_needs_url() {
    let results = provider("rust").normalize(r#"{"Definition": "orphan"}"#).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Search results for \"rust\"");
}

#[test]
fn test_nothing_usable_synthesizes_one_result() {
    let results = provider("zzqx").normalize("{}").unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].link, "https://duckduckgo.com/?q=zzqx");
}

#[test]
fn test_malformed_body() {
    assert!(matches!(
        provider("rust").normalize("<html>rate limited</html>"),
        Err(FetchError::Malformed(_))
    ));
}

#[test]
fn test_request_url_encodes_query() {
    let request = provider("c++ & rust").request();
    assert_eq!(
        request.url,
        "https://api.duckduckgo.com/?q=c%2B%2B%20%26%20rust&format=json&no_html=1&skip_disambig=1"
    );
}

#[tokio::test]
async fn test_failed_search_substitutes_local_card() {
    let transport = ScriptedTransport::new().fail(SEARCH_API, FetchError::Status(502));

    let results = search(&transport, &EndpointConfig::default(), "rust").await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Search Error");
    assert_eq!(results[0].link, "https://duckduckgo.com/?q=rust");
    assert_eq!(transport.calls().len(), 1);
}
