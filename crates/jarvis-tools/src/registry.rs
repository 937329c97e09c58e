use crate::capability::ToolCapability;
use crate::catalog::{Credential, ToolDescriptor, ToolKind};
use crate::database::DatabaseBackend;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Tools that are always offered, in the order they are handed to the runtime.
const LOCAL_TOOLS: [ToolKind; 10] = [
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
];

const WEB_TOOLS: [ToolKind; 3] = [
    ToolKind::WebsiteSearch,
    ToolKind::ScrapeWebsite,
    ToolKind::SeleniumScraping,
];

const FIRECRAWL_TOOLS: [ToolKind; 3] = [
    ToolKind::FirecrawlCrawlWebsite,
    ToolKind::FirecrawlScrapeWebsite,
    ToolKind::FirecrawlSearch,
];

const CODE_TOOLS: [ToolKind; 2] = [ToolKind::CodeDocsSearch, ToolKind::GithubSearch];

const VIDEO_TOOLS: [ToolKind; 2] = [ToolKind::YoutubeChannelSearch, ToolKind::YoutubeVideoSearch];

/// Inputs that decide which optional tools are offered.
#[derive(Debug, Clone, Default)]
pub struct ToolSelection {
    pub credentials: HashSet<Credential>,
    pub database_url: Option<String>,
}

impl ToolSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credentials.insert(credential);
        self
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn has(&self, credential: Credential) -> bool {
        self.credentials.contains(&credential)
    }
}

/// Ordered list of tools chosen once per orchestrator.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard tool list, dropping tools whose credential is absent.
    pub fn select(selection: &ToolSelection) -> Self {
        let mut registry = Self::new();

        registry.extend(LOCAL_TOOLS);

        if selection.has(Credential::Serper) {
            registry.register(ToolKind::SerperDev);
        } else {
            debug!("SERPER_API_KEY not set, skipping serper_dev");
        }

        registry.extend(WEB_TOOLS);

        if selection.has(Credential::Firecrawl) {
            registry.extend(FIRECRAWL_TOOLS);
        } else {
            debug!("FIRECRAWL_API_KEY not set, skipping firecrawl tools");
        }

        registry.extend(CODE_TOOLS);
        registry.extend(VIDEO_TOOLS);

        if selection.has(Credential::Database) {
            match selection.database_url.as_deref().and_then(DatabaseBackend::from_url) {
                Some(backend) => registry.register(backend.tool()),
                None => warn!("DATABASE_URL is missing or has an unsupported scheme, no database tool added"),
            }
        } else {
            debug!("DATABASE_URL not set, skipping database tools");
        }

        info!(count = registry.len(), "Tool selection complete");
        registry
    }

    /// Append a tool. Adding the same kind twice is a no-op.
    pub fn register(&mut self, kind: ToolKind) {
        if self.contains(kind) {
            return;
        }
        debug!(tool = %kind, "Registered tool");
        self.tools.push(kind.descriptor());
    }

    fn extend(&mut self, kinds: impl IntoIterator<Item = ToolKind>) {
        for kind in kinds {
            self.register(kind);
        }
    }

    pub fn contains(&self, kind: ToolKind) -> bool {
        self.tools.iter().any(|t| t.kind == kind)
    }

    pub fn get(&self, kind: ToolKind) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.kind == kind)
    }

    pub fn descriptors(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn kinds(&self) -> Vec<ToolKind> {
        self.tools.iter().map(|t| t.kind).collect()
    }

    /// Tools carrying at least one of `wanted`, in registry order.
    pub fn with_any_capability(&self, wanted: &[ToolCapability]) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .filter(|t| t.has_any(wanted))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
