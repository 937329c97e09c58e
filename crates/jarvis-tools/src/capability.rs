use jarvis_core::JarvisError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// What a tool can do. Agents pick their tool subset by these tags.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCapability {
    /// Reads or lists local files and directories.
    FileSystem,
    /// Searches source code or code documentation.
    Code,
    PlainText,
    Json,
    Xml,
    Markdown,
    Pdf,
    Docx,
    /// Semantic or web search over some corpus.
    Search,
    /// Extracts content from rendered web pages.
    Scrape,
    /// Works on whole websites rather than single documents.
    Website,
    Video,
    /// Searches hosted source repositories.
    Repository,
    /// Crawls sites through the Firecrawl service.
    Crawl,
    Database,
    /// Queries a public web search API.
    WebSearch,
    /// Drives a headless browser.
    Browser,
}

impl std::fmt::Display for ToolCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ToolCapability::FileSystem => "file_system",
            ToolCapability::Code => "code",
            ToolCapability::PlainText => "plain_text",
            ToolCapability::Json => "json",
            ToolCapability::Xml => "xml",
            ToolCapability::Markdown => "markdown",
            ToolCapability::Pdf => "pdf",
            ToolCapability::Docx => "docx",
            ToolCapability::Search => "search",
            ToolCapability::Scrape => "scrape",
            ToolCapability::Website => "website",
            ToolCapability::Video => "video",
            ToolCapability::Repository => "repository",
            ToolCapability::Crawl => "crawl",
            ToolCapability::Database => "database",
            ToolCapability::WebSearch => "web_search",
            ToolCapability::Browser => "browser",
        };
        f.write_str(label)
    }
}

impl FromStr for ToolCapability {
    type Err = JarvisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cap = match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "file_system" | "files" => ToolCapability::FileSystem,
            "code" => ToolCapability::Code,
            "plain_text" | "txt" => ToolCapability::PlainText,
            "json" => ToolCapability::Json,
            "xml" => ToolCapability::Xml,
            "markdown" | "mdx" => ToolCapability::Markdown,
            "pdf" => ToolCapability::Pdf,
            "docx" => ToolCapability::Docx,
            "search" => ToolCapability::Search,
            "scrape" => ToolCapability::Scrape,
            "website" => ToolCapability::Website,
            "video" | "youtube" => ToolCapability::Video,
            "repository" | "github" => ToolCapability::Repository,
            "crawl" | "firecrawl" => ToolCapability::Crawl,
            "database" | "db" => ToolCapability::Database,
            "web_search" | "serper" => ToolCapability::WebSearch,
            "browser" | "selenium" => ToolCapability::Browser,
            other => {
                return Err(JarvisError::Tool(format!("Unknown tool capability: {other}")));
            }
        };
        Ok(cap)
    }
}

/// An ordered set of capability tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet {
    tags: BTreeSet<ToolCapability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cap: ToolCapability) {
        self.tags.insert(cap);
    }

    pub fn has(&self, cap: ToolCapability) -> bool {
        self.tags.contains(&cap)
    }

    /// True when at least one of `wanted` is present.
    pub fn intersects(&self, wanted: &[ToolCapability]) -> bool {
        wanted.iter().any(|cap| self.tags.contains(cap))
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ToolCapability> + '_ {
        self.tags.iter().copied()
    }
}

impl FromIterator<ToolCapability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = ToolCapability>>(iter: I) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[ToolCapability; N]> for CapabilitySet {
    fn from(caps: [ToolCapability; N]) -> Self {
        caps.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let set = CapabilitySet::from([ToolCapability::Search, ToolCapability::Pdf]);
        assert!(set.intersects(&[ToolCapability::Pdf, ToolCapability::Code]));
        assert!(!set.intersects(&[ToolCapability::Code]));
        assert!(!set.intersects(&[]));
    }

    #[test]
    fn test_iter_is_ordered() {
        let set = CapabilitySet::from([ToolCapability::Search, ToolCapability::FileSystem]);
        let tags: Vec<_> = set.iter().collect();
        assert_eq!(tags, vec![ToolCapability::FileSystem, ToolCapability::Search]);
    }

    #[test]
    fn test_serializes_as_list() {
        let set = CapabilitySet::from([ToolCapability::Video]);
        let json = serde_json::to_string(&set).unwrap_or_default();
        assert_eq!(json, r#"["video"]"#);
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("youtube".parse::<ToolCapability>().ok(), Some(ToolCapability::Video));
        assert_eq!("File-System".parse::<ToolCapability>().ok(), Some(ToolCapability::FileSystem));
        assert!("telepathy".parse::<ToolCapability>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        let cap = ToolCapability::Repository;
        assert_eq!(cap.to_string().parse::<ToolCapability>().ok(), Some(cap));
    }

    #[test]
    fn test_display_matches_serde_name() {
        for cap in [
            ToolCapability::PlainText,
            ToolCapability::FileSystem,
            ToolCapability::WebSearch,
        ] {
            let json = serde_json::to_string(&cap).unwrap_or_default();
            assert_eq!(json, format!("\"{cap}\""));
        }
    }
}
