use super::http::{FetchError, HttpRequest, HttpTransport};
use crate::config::EndpointConfig;

/// Page a user can open when the plain-text endpoint is unavailable.
pub fn weather_page_url(base: &str, location: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), urlencoding::encode(location))
}

/// Fetches "<condition> <temperature>" for `location` from wttr.in.
pub async fn current_conditions(
    transport: &dyn HttpTransport,
    endpoints: &EndpointConfig,
    location: &str,
) -> Result<String, FetchError> {
    let url = format!("{}?format=%C+%t", weather_page_url(&endpoints.weather, location));
    let body = transport.get(&HttpRequest::get(url)).await?;

    let text = body.trim();
    if text.is_empty() {
        return Err(FetchError::Malformed("empty weather report".to_string()));
    }
    Ok(text.to_string())
}
