use crate::agents::AgentRole;
use crate::config::WorkspaceLayout;
use serde::{Deserialize, Serialize};

/// A prompt assigned to one agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Stable identifier used to match runtime output back to the task.
    pub name: String,
    pub description: String,
    pub expected_output: String,
    pub agent: AgentRole,
}

/// Builds the Jarvis task prompts.
#[derive(Debug, Clone)]
pub struct TaskFactory {
    workspace: WorkspaceLayout,
}

impl TaskFactory {
    pub fn new(workspace: WorkspaceLayout) -> Self {
        Self { workspace }
    }

    /// Survey the `.roo` and `.ruru` directories.
    pub fn roo_analysis(&self, agent: AgentRole) -> TaskSpec {
        TaskSpec {
            name: "roo_analysis".to_string(),
            description: format!(
                "Analyze the current roo-commander ecosystem structure:\n\
                 1. Read and understand the .roo ({}) and .ruru ({}) directory structures\n\
                 2. Identify key rules, modes, and workflows\n\
                 3. Assess the current configuration and capabilities\n\
                 4. Provide recommendations for optimization or improvements",
                self.workspace.roo_dir().display(),
                self.workspace.ruru_dir().display(),
            ),
            expected_output: "Comprehensive analysis report of the roo-commander ecosystem \
                              with actionable recommendations"
                .to_string(),
            agent,
        }
    }

    pub fn code_integration(&self, agent: AgentRole, integration_type: &str) -> TaskSpec {
        TaskSpec {
            name: "code_integration".to_string(),
            description: format!(
                "Integrate {integration_type} into the Jarvis AI system:\n\
                 1. Analyze the current codebase structure\n\
                 2. Identify integration points and dependencies\n\
                 3. Create or modify configuration files as needed\n\
                 4. Ensure compatibility with existing roo-commander workflows\n\
                 5. Document the integration process and usage"
            ),
            expected_output: format!(
                "Complete {integration_type} integration with documentation and configuration files"
            ),
            agent,
        }
    }

    pub fn documentation(&self, agent: AgentRole, topic: &str) -> TaskSpec {
        TaskSpec {
            name: "documentation".to_string(),
            description: format!(
                "Create comprehensive documentation for {topic}:\n\
                 1. Research the topic thoroughly\n\
                 2. Understand the context within the Jarvis AI system\n\
                 3. Create structured documentation using TOML+MD format\n\
                 4. Include examples, usage patterns, and best practices\n\
                 5. Ensure consistency with existing documentation standards"
            ),
            expected_output: format!(
                "Complete documentation for {topic} in TOML+MD format with examples and best practices"
            ),
            agent,
        }
    }

    pub fn research(&self, agent: AgentRole, topic: &str) -> TaskSpec {
        TaskSpec {
            name: "research".to_string(),
            description: format!(
                "Research {topic} comprehensively:\n\
                 1. Gather information from multiple sources\n\
                 2. Analyze current trends and best practices\n\
                 3. Identify relevant tools and technologies\n\
                 4. Assess compatibility with Jarvis AI system"
            ),
            expected_output: format!("Comprehensive research report on {topic}"),
            agent,
        }
    }
}
