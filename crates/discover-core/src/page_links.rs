//! Pagination link descriptors
//!
//! The saved query listing reports its neighbours through a link-header style
//! descriptor:
//!
//! ```text
//! <https://host/api/?cursor=0:0:1>; rel="previous"; results="false"; cursor="0:0:1",
//! <https://host/api/?cursor=0:100:0>; rel="next"; results="true"; cursor="0:100:0"
//! ```
//!
//! `PageLinks` is the full parse and is handed to the pagination widget as-is.
//! `PaginationState` is the reduced form the list composer needs; it never
//! fails and treats a malformed descriptor as "no previous page".

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LinkParseError;

// key="value" or key=value
static ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*([A-Za-z][A-Za-z0-9_-]*)\s*=\s*(?:"([^"]*)"|([^\s"]*))\s*$"#)
        .expect("valid regex")
});

/// One relation entry of a link descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub href: Option<String>,
    pub rel: String,
    /// `None` when the entry carries no `results` attribute
    pub results: Option<bool>,
    pub cursor: Option<String>,
}

impl PageLink {
    /// A missing `results` attribute counts as having results
    pub fn has_results(&self) -> bool {
        self.results.unwrap_or(true)
    }
}

/// Parsed previous/next links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub previous: Option<PageLink>,
    pub next: Option<PageLink>,
}

impl PageLinks {
    /// Parse a raw descriptor. Empty input has no links.
    pub fn parse(raw: &str) -> Result<Self, LinkParseError> {
        let mut links = PageLinks::default();

        for entry in split_top_level(raw, ',')? {
            if entry.trim().is_empty() {
                continue;
            }
            let link = parse_entry(&entry)?;
            let slot = match link.rel.as_str() {
                "previous" => &mut links.previous,
                "next" => &mut links.next,
                other => {
                    tracing::trace!(rel = other, "ignoring unknown link relation");
                    continue;
                }
            };
            if slot.is_none() {
                *slot = Some(link);
            }
        }

        Ok(links)
    }

    pub fn previous_cursor(&self) -> Option<&str> {
        self.previous.as_ref().and_then(|link| link.cursor.as_deref())
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next.as_ref().and_then(|link| link.cursor.as_deref())
    }

    pub fn has_next_results(&self) -> bool {
        self.next.as_ref().is_some_and(PageLink::has_results)
    }

    pub fn has_previous_results(&self) -> bool {
        self.previous.as_ref().is_some_and(PageLink::has_results)
    }
}

/// Where the current saved-query page sits relative to the first page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationState {
    pub has_previous: bool,
    pub previous_has_results: bool,
}

impl PaginationState {
    /// Parse a raw descriptor, falling back to "no previous page" when malformed
    pub fn parse(raw: &str) -> Self {
        match PageLinks::parse(raw) {
            Ok(links) => Self::from(&links),
            Err(error) => {
                tracing::warn!(%error, descriptor = raw, "malformed pagination descriptor, showing presets");
                Self::default()
            }
        }
    }

    /// True when this is logically the first page of saved queries
    pub fn is_first_page(&self) -> bool {
        !self.has_previous || !self.previous_has_results
    }
}

impl From<&PageLinks> for PaginationState {
    fn from(links: &PageLinks) -> Self {
        Self {
            has_previous: links.previous.is_some(),
            previous_has_results: links.has_previous_results(),
        }
    }
}

fn parse_entry(entry: &str) -> Result<PageLink, LinkParseError> {
    let mut segments = split_top_level(entry, ';')?;
    let mut href = None;
    let mut rel = None;
    let mut results = None;
    let mut cursor = None;

    if let Some(first) = segments.first().map(|s| s.trim().to_string()) {
        if let Some(inner) = first.strip_prefix('<') {
            let inner = inner
                .strip_suffix('>')
                .ok_or_else(|| LinkParseError::MalformedAttribute(first.clone()))?;
            href = Some(inner.to_string());
            segments.remove(0);
        }
    }

    for segment in &segments {
        if segment.trim().is_empty() {
            continue;
        }
        let captures = ATTRIBUTE_REGEX
            .captures(segment)
            .ok_or_else(|| LinkParseError::MalformedAttribute(segment.trim().to_string()))?;
        let value = captures
            .get(2)
            .or_else(|| captures.get(3))
            .map_or("", |m| m.as_str());

        match &captures[1] {
            "rel" => rel = Some(value.to_string()),
            "results" => {
                results = Some(match value {
                    "true" => true,
                    "false" => false,
                    other => return Err(LinkParseError::InvalidResults(other.to_string())),
                })
            }
            "cursor" => cursor = Some(value.to_string()),
            _ => {}
        }
    }

    let rel = rel.ok_or_else(|| LinkParseError::MissingRel(entry.trim().to_string()))?;
    Ok(PageLink {
        href,
        rel,
        results,
        cursor,
    })
}

/// Split on `separator`, ignoring separators inside `<...>` or double quotes
fn split_top_level(input: &str, separator: char) -> Result<Vec<String>, LinkParseError> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_angle = false;
    let mut in_quote = false;

    for ch in input.chars() {
        match ch {
            '"' if !in_angle => in_quote = !in_quote,
            '<' if !in_quote => in_angle = true,
            '>' if !in_quote => in_angle = false,
            c if c == separator && !in_angle && !in_quote => {
                parts.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }

    if in_angle {
        return Err(LinkParseError::Unterminated("angle bracket"));
    }
    if in_quote {
        return Err(LinkParseError::Unterminated("quote"));
    }

    parts.push(current);
    Ok(parts)
}

#[cfg(test)]
mod tests;
