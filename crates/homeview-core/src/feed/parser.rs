use chrono::{DateTime, Utc};
use feed_rs::parser;

use super::models::Headline;
use crate::{Error, Result};

/// Parse RSS/Atom content into at most `max_items` headlines
pub fn parse_headlines(content: &[u8], default_source: &str, max_items: usize) -> Result<Vec<Headline>> {
    let feed = parser::parse(content).map_err(|e| Error::FeedParse(e.to_string()))?;

    let headlines = feed
        .entries
        .into_iter()
        .take(max_items)
        .map(|entry| {
            let title = entry
                .title
                .map(|t| html_to_text(&t.content))
                .unwrap_or_else(|| "Untitled".to_string());

            let description = entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body))
                .map(|html| html_to_text(&html))
                .unwrap_or_default();

            // Aggregators put the publisher in the author field
            let source = entry
                .authors
                .first()
                .map(|a| a.name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| default_source.to_string());

            let link = entry.links.first().map(|l| l.href.clone());
            let published_at = entry.published.or(entry.updated).map(DateTime::<Utc>::from);

            Headline {
                title,
                description,
                source,
                link,
                published_at,
            }
        })
        .collect();

    Ok(headlines)
}

/// Convert HTML content to a single line of plain text
fn html_to_text(html: &str) -> String {
    let text = html2text::from_read(html.as_bytes(), 10_000).unwrap_or_else(|_| html.to_string());
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
