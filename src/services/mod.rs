pub mod fallback;
pub mod http;
pub mod joke;
pub mod search;
pub mod weather;

pub use fallback::{fetch_with_fallback, Provider};
pub use http::{FetchError, HttpRequest, HttpTransport, ReqwestTransport};
pub use search::SearchResult;
