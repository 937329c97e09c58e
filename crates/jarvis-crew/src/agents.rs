use crate::config::{JarvisConfig, ModelConfig};
use jarvis_tools::{ToolCapability, ToolDescriptor, ToolRegistry};
use serde::{Deserialize, Serialize};
use tracing::info;

/// The fixed roles Jarvis staffs its crews with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    /// Coordinates the roo-commander modes and delegates work.
    RooCommander,
    /// Reads code and reports structure, patterns and integration points.
    CodeAnalyst,
    /// Gathers information from the web, docs and databases.
    Researcher,
    /// Writes TOML+Markdown documentation.
    Documentation,
}

impl AgentRole {
    pub const ALL: [AgentRole; 4] = [
        AgentRole::RooCommander,
        AgentRole::CodeAnalyst,
        AgentRole::Researcher,
        AgentRole::Documentation,
    ];

    /// Capabilities whose tools this role receives. `None` means every tool.
    pub fn tool_capabilities(self) -> Option<&'static [ToolCapability]> {
        match self {
            AgentRole::RooCommander => None,
            AgentRole::CodeAnalyst => Some(&CODE_ANALYST_CAPABILITIES),
            AgentRole::Researcher => Some(&RESEARCH_CAPABILITIES),
            AgentRole::Documentation => Some(&DOCUMENTATION_CAPABILITIES),
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentRole::RooCommander => write!(f, "roo_commander"),
            AgentRole::CodeAnalyst => write!(f, "code_analyst"),
            AgentRole::Researcher => write!(f, "researcher"),
            AgentRole::Documentation => write!(f, "documentation"),
        }
    }
}

static CODE_ANALYST_CAPABILITIES: [ToolCapability; 5] = [
    ToolCapability::FileSystem,
    ToolCapability::Code,
    ToolCapability::PlainText,
    ToolCapability::Json,
    ToolCapability::Xml,
];

static RESEARCH_CAPABILITIES: [ToolCapability; 6] = [
    ToolCapability::Search,
    ToolCapability::Scrape,
    ToolCapability::Website,
    ToolCapability::Video,
    ToolCapability::Repository,
    ToolCapability::Crawl,
];

static DOCUMENTATION_CAPABILITIES: [ToolCapability; 5] = [
    ToolCapability::FileSystem,
    ToolCapability::PlainText,
    ToolCapability::Markdown,
    ToolCapability::Pdf,
    ToolCapability::Docx,
];

/// Template for one agent, handed to the crew runtime as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSpec {
    pub role: AgentRole,
    /// Human-readable role title shown to the model.
    pub title: String,
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<ToolDescriptor>,
    pub verbose: bool,
    pub allow_delegation: bool,
    pub max_iter: u32,
    pub memory: bool,
    pub llm: ModelConfig,
}

impl AgentSpec {
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Builds the four Jarvis agents over a tool list chosen once.
pub struct AgentFactory {
    tools: ToolRegistry,
    model: ModelConfig,
}

impl AgentFactory {
    pub fn new(config: &JarvisConfig) -> Self {
        let tools = ToolRegistry::select(&config.tool_selection());
        info!(tools = tools.len(), model = %config.model.llm_id(), "Agent factory ready");
        Self::with_tools(tools, config.model.clone())
    }

    pub fn with_tools(tools: ToolRegistry, model: ModelConfig) -> Self {
        Self { tools, model }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// The tool subset a role receives, in registry order.
    pub fn tools_for(&self, role: AgentRole) -> Vec<ToolDescriptor> {
        match role.tool_capabilities() {
            Some(caps) => self.tools.with_any_capability(caps),
            None => self.tools.descriptors().to_vec(),
        }
    }

    pub fn create(&self, role: AgentRole) -> AgentSpec {
        match role {
            AgentRole::RooCommander => self.roo_commander(),
            AgentRole::CodeAnalyst => self.code_analyst(),
            AgentRole::Researcher => self.researcher(),
            AgentRole::Documentation => self.documentation(),
        }
    }

    pub fn roo_commander(&self) -> AgentSpec {
        AgentSpec {
            role: AgentRole::RooCommander,
            title: "Roo Commander Interface".to_string(),
            goal: "Interface with the roo-commander ecosystem and coordinate AI agent tasks"
                .to_string(),
            backstory: ROO_COMMANDER_BACKSTORY.to_string(),
            tools: self.tools_for(AgentRole::RooCommander),
            verbose: true,
            allow_delegation: true,
            max_iter: 5,
            memory: true,
            llm: self.model.clone(),
        }
    }

    pub fn code_analyst(&self) -> AgentSpec {
        AgentSpec {
            role: AgentRole::CodeAnalyst,
            title: "Code Analyst".to_string(),
            goal: "Analyze code structure, patterns, and provide insights for development"
                .to_string(),
            backstory: CODE_ANALYST_BACKSTORY.to_string(),
            tools: self.tools_for(AgentRole::CodeAnalyst),
            verbose: true,
            allow_delegation: false,
            max_iter: 3,
            memory: true,
            llm: self.model.clone(),
        }
    }

    pub fn researcher(&self) -> AgentSpec {
        AgentSpec {
            role: AgentRole::Researcher,
            title: "Research Specialist".to_string(),
            goal: "Conduct thorough research and gather relevant information from various sources"
                .to_string(),
            backstory: RESEARCHER_BACKSTORY.to_string(),
            tools: self.tools_for(AgentRole::Researcher),
            verbose: true,
            allow_delegation: false,
            max_iter: 4,
            memory: true,
            llm: self.model.clone(),
        }
    }

    pub fn documentation(&self) -> AgentSpec {
        AgentSpec {
            role: AgentRole::Documentation,
            title: "Documentation Specialist".to_string(),
            goal: "Create, update, and maintain high-quality documentation".to_string(),
            backstory: DOCUMENTATION_BACKSTORY.to_string(),
            tools: self.tools_for(AgentRole::Documentation),
            verbose: true,
            allow_delegation: false,
            max_iter: 3,
            memory: true,
            llm: self.model.clone(),
        }
    }
}

const ROO_COMMANDER_BACKSTORY: &str = "\
You are an expert AI agent coordinator that understands the roo-commander \
ecosystem. You can read and interpret TOML+Markdown files, understand MDTM \
workflows, and coordinate with specialized AI modes.";

const CODE_ANALYST_BACKSTORY: &str = "\
You are an expert code analyst with deep knowledge of multiple programming \
languages, design patterns, and software architecture. You can analyze \
codebases and provide actionable insights.";

const RESEARCHER_BACKSTORY: &str = "\
You are an expert researcher with the ability to find, analyze, and \
synthesize information from multiple sources including web content, \
documentation, and databases.";

const DOCUMENTATION_BACKSTORY: &str = "\
You are an expert technical writer who specializes in creating clear, \
comprehensive documentation. You understand various documentation formats \
including Markdown, TOML+MD, and can work with the roo-commander \
documentation standards.";
