pub mod client;
pub mod error;
pub mod extract;
pub mod ident;
mod retry;

pub use client::ProxyClient;
pub use error::ScrapeError;
pub use extract::{build_record, extract_product};
pub use ident::resolve_identifier;
