//! Reading uploaded documents and regulation pages over HTTP or from disk.

mod html;
mod source;

pub use html::html_to_text;
pub use source::{DEFAULT_FETCH_TIMEOUT, DocumentFetcher, USER_AGENT, http_client, is_url};
