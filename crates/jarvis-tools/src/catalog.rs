use crate::capability::{CapabilitySet, ToolCapability};
use serde::{Deserialize, Serialize};

/// Credentials that gate optional tools.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Credential {
    /// `SERPER_API_KEY`
    Serper,
    /// `FIRECRAWL_API_KEY`
    Firecrawl,
    /// `DATABASE_URL`
    Database,
}

/// Every tool the crew runtime ships that Jarvis knows how to hand out.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    FileRead,
    DirectoryRead,
    DirectorySearch,
    TxtSearch,
    JsonSearch,
    MdxSearch,
    PdfSearch,
    DocxSearch,
    CsvSearch,
    XmlSearch,
    SerperDev,
    WebsiteSearch,
    ScrapeWebsite,
    SeleniumScraping,
    FirecrawlCrawlWebsite,
    FirecrawlScrapeWebsite,
    FirecrawlSearch,
    CodeDocsSearch,
    GithubSearch,
    YoutubeChannelSearch,
    YoutubeVideoSearch,
    PgSearch,
    MySqlSearch,
}

impl ToolKind {
    pub const ALL: [ToolKind; 23] = [
        ToolKind::FileRead,
        ToolKind::DirectoryRead,
        ToolKind::DirectorySearch,
        ToolKind::TxtSearch,
        ToolKind::JsonSearch,
        ToolKind::MdxSearch,
        ToolKind::PdfSearch,
        ToolKind::DocxSearch,
        ToolKind::CsvSearch,
        ToolKind::XmlSearch,
        ToolKind::SerperDev,
        ToolKind::WebsiteSearch,
        ToolKind::ScrapeWebsite,
        ToolKind::SeleniumScraping,
        ToolKind::FirecrawlCrawlWebsite,
        ToolKind::FirecrawlScrapeWebsite,
        ToolKind::FirecrawlSearch,
        ToolKind::CodeDocsSearch,
        ToolKind::GithubSearch,
        ToolKind::YoutubeChannelSearch,
        ToolKind::YoutubeVideoSearch,
        ToolKind::PgSearch,
        ToolKind::MySqlSearch,
    ];

    /// Snake-case name used in crew payloads and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::FileRead => "file_read",
            ToolKind::DirectoryRead => "directory_read",
            ToolKind::DirectorySearch => "directory_search",
            ToolKind::TxtSearch => "txt_search",
            ToolKind::JsonSearch => "json_search",
            ToolKind::MdxSearch => "mdx_search",
            ToolKind::PdfSearch => "pdf_search",
            ToolKind::DocxSearch => "docx_search",
            ToolKind::CsvSearch => "csv_search",
            ToolKind::XmlSearch => "xml_search",
            ToolKind::SerperDev => "serper_dev",
            ToolKind::WebsiteSearch => "website_search",
            ToolKind::ScrapeWebsite => "scrape_website",
            ToolKind::SeleniumScraping => "selenium_scraping",
            ToolKind::FirecrawlCrawlWebsite => "firecrawl_crawl_website",
            ToolKind::FirecrawlScrapeWebsite => "firecrawl_scrape_website",
            ToolKind::FirecrawlSearch => "firecrawl_search",
            ToolKind::CodeDocsSearch => "code_docs_search",
            ToolKind::GithubSearch => "github_search",
            ToolKind::YoutubeChannelSearch => "youtube_channel_search",
            ToolKind::YoutubeVideoSearch => "youtube_video_search",
            ToolKind::PgSearch => "pg_search",
            ToolKind::MySqlSearch => "mysql_search",
        }
    }

    /// Class name the crew runtime instantiates for this tool.
    pub fn class_name(self) -> &'static str {
        match self {
            ToolKind::FileRead => "FileReadTool",
            ToolKind::DirectoryRead => "DirectoryReadTool",
            ToolKind::DirectorySearch => "DirectorySearchTool",
            ToolKind::TxtSearch => "TXTSearchTool",
            ToolKind::JsonSearch => "JSONSearchTool",
            ToolKind::MdxSearch => "MDXSearchTool",
            ToolKind::PdfSearch => "PDFSearchTool",
            ToolKind::DocxSearch => "DOCXSearchTool",
            ToolKind::CsvSearch => "CSVSearchTool",
            ToolKind::XmlSearch => "XMLSearchTool",
            ToolKind::SerperDev => "SerperDevTool",
            ToolKind::WebsiteSearch => "WebsiteSearchTool",
            ToolKind::ScrapeWebsite => "ScrapeWebsiteTool",
            ToolKind::SeleniumScraping => "SeleniumScrapingTool",
            ToolKind::FirecrawlCrawlWebsite => "FirecrawlCrawlWebsiteTool",
            ToolKind::FirecrawlScrapeWebsite => "FirecrawlScrapeWebsiteTool",
            ToolKind::FirecrawlSearch => "FirecrawlSearchTool",
            ToolKind::CodeDocsSearch => "CodeDocsSearchTool",
            ToolKind::GithubSearch => "GithubSearchTool",
            ToolKind::YoutubeChannelSearch => "YoutubeChannelSearchTool",
            ToolKind::YoutubeVideoSearch => "YoutubeVideoSearchTool",
            ToolKind::PgSearch => "PGSearchTool",
            ToolKind::MySqlSearch => "MySQLSearchTool",
        }
    }

    fn description(self) -> &'static str {
        match self {
            ToolKind::FileRead => "Read the contents of a file in the workspace.",
            ToolKind::DirectoryRead => "List the entries of a directory.",
            ToolKind::DirectorySearch => "Semantic search across the files of a directory.",
            ToolKind::TxtSearch => "Semantic search inside plain-text files.",
            ToolKind::JsonSearch => "Semantic search inside JSON documents.",
            ToolKind::MdxSearch => "Semantic search inside MDX/Markdown documents.",
            ToolKind::PdfSearch => "Semantic search inside PDF documents.",
            ToolKind::DocxSearch => "Semantic search inside DOCX documents.",
            ToolKind::CsvSearch => "Semantic search inside CSV files.",
            ToolKind::XmlSearch => "Semantic search inside XML documents.",
            ToolKind::SerperDev => "Google search through the Serper.dev API.",
            ToolKind::WebsiteSearch => "Semantic search over the content of a website.",
            ToolKind::ScrapeWebsite => "Fetch and extract the text of a web page.",
            ToolKind::SeleniumScraping => "Scrape JavaScript-rendered pages with a headless browser.",
            ToolKind::FirecrawlCrawlWebsite => "Crawl a website through Firecrawl.",
            ToolKind::FirecrawlScrapeWebsite => "Scrape a single page through Firecrawl.",
            ToolKind::FirecrawlSearch => "Web search through Firecrawl.",
            ToolKind::CodeDocsSearch => "Semantic search over code documentation sites.",
            ToolKind::GithubSearch => "Search code, issues and pull requests on GitHub.",
            ToolKind::YoutubeChannelSearch => "Semantic search over a YouTube channel.",
            ToolKind::YoutubeVideoSearch => "Semantic search over a YouTube video transcript.",
            ToolKind::PgSearch => "Semantic search over a PostgreSQL table.",
            ToolKind::MySqlSearch => "Semantic search over a MySQL table.",
        }
    }

    /// Capability tags attached to the tool at construction.
    pub fn capabilities(self) -> CapabilitySet {
        use ToolCapability::*;
        match self {
            ToolKind::FileRead => [FileSystem].into(),
            ToolKind::DirectoryRead => [FileSystem].into(),
            ToolKind::DirectorySearch => [FileSystem, Search].into(),
            ToolKind::TxtSearch => [PlainText, Search].into(),
            ToolKind::JsonSearch => [Json, Search].into(),
            ToolKind::MdxSearch => [Markdown, Search].into(),
            ToolKind::PdfSearch => [Pdf, Search].into(),
            ToolKind::DocxSearch => [Docx, Search].into(),
            ToolKind::CsvSearch => [Search].into(),
            ToolKind::XmlSearch => [Xml, Search].into(),
            ToolKind::SerperDev => [WebSearch].into(),
            ToolKind::WebsiteSearch => [Website, Search].into(),
            ToolKind::ScrapeWebsite => [Scrape, Website].into(),
            ToolKind::SeleniumScraping => [Browser].into(),
            ToolKind::FirecrawlCrawlWebsite => [Crawl, Website].into(),
            ToolKind::FirecrawlScrapeWebsite => [Crawl, Scrape, Website].into(),
            ToolKind::FirecrawlSearch => [Crawl, Search].into(),
            ToolKind::CodeDocsSearch => [Code, Search].into(),
            ToolKind::GithubSearch => [Repository, Search].into(),
            ToolKind::YoutubeChannelSearch => [Video, Search].into(),
            ToolKind::YoutubeVideoSearch => [Video, Search].into(),
            ToolKind::PgSearch => [Database, Search].into(),
            ToolKind::MySqlSearch => [Database, Search].into(),
        }
    }

    /// The credential without which this tool is not offered, if any.
    pub fn required_credential(self) -> Option<Credential> {
        match self {
            ToolKind::SerperDev => Some(Credential::Serper),
            ToolKind::FirecrawlCrawlWebsite
            | ToolKind::FirecrawlScrapeWebsite
            | ToolKind::FirecrawlSearch => Some(Credential::Firecrawl),
            ToolKind::PgSearch | ToolKind::MySqlSearch => Some(Credential::Database),
            _ => None,
        }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            kind: self,
            name: self.name().to_string(),
            class_name: self.class_name().to_string(),
            description: self.description().to_string(),
            capabilities: self.capabilities(),
            requires: self.required_credential(),
        }
    }

    /// Look a tool up by its snake-case name or runtime class name.
    pub fn parse(s: &str) -> Option<Self> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s || kind.class_name() == s)
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the crew runtime needs to instantiate one tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub kind: ToolKind,
    pub name: String,
    pub class_name: String,
    pub description: String,
    pub capabilities: CapabilitySet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires: Option<Credential>,
}

impl ToolDescriptor {
    pub fn has_any(&self, wanted: &[ToolCapability]) -> bool {
        self.capabilities.intersects(wanted)
    }
}
