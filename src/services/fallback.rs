use tracing::{debug, warn};

use super::http::{FetchError, HttpRequest, HttpTransport};

/// One remote data source in a fallback chain. Each provider knows how to
/// build its request and how to turn its own response shape into the common
/// output type.
pub trait Provider {
    type Output;

    fn name(&self) -> &str;

    fn request(&self) -> HttpRequest;

    /// Fails with `FetchError::Malformed` when `body` does not have the shape
    /// this provider promises.
    fn normalize(&self, body: &str) -> Result<Self::Output, FetchError>;
}

/// Tries `providers` strictly in order, each exactly once, and returns the
/// first normalized value. A transport error, non-2xx status or malformed
/// body discards that attempt and moves on.
pub async fn fetch_with_fallback<P: Provider>(
    transport: &dyn HttpTransport,
    providers: &[P],
) -> Result<P::Output, FetchError> {
    for provider in providers {
        let request = provider.request();
        debug!("Trying provider {} ({})", provider.name(), request.url);

        let outcome = match transport.get(&request).await {
            Ok(body) => provider.normalize(&body),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(value) => return Ok(value),
            Err(e) => warn!("Provider {} failed: {}", provider.name(), e),
        }
    }

    Err(FetchError::AllProvidersFailed {
        attempted: providers.len(),
    })
}
