mod fetcher;
mod models;
mod parser;
mod service;

pub use fetcher::{HeadlineSource, RssHeadlineSource};
pub use models::{fallback_headlines, Headline};
pub use parser::parse_headlines;
pub use service::NewsService;
