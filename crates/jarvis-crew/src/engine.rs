use crate::agents::{AgentFactory, AgentRole};
use crate::config::JarvisConfig;
use crate::crew::{Crew, CrewKind};
use crate::runtime::{CrewOutput, CrewRuntime};
use crate::tasks::TaskFactory;
use chrono::{DateTime, Utc};
use jarvis_core::{JarvisError, JarvisResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Which workflow a report belongs to, with its type or topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "workflow", rename_all = "snake_case")]
pub enum WorkflowKind {
    Integration { integration_type: String },
    Research { research_topic: String },
}

impl WorkflowKind {
    pub fn subject(&self) -> &str {
        match self {
            WorkflowKind::Integration { integration_type } => integration_type,
            WorkflowKind::Research { research_topic } => research_topic,
        }
    }
}

impl std::fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowKind::Integration { .. } => write!(f, "integration"),
            WorkflowKind::Research { .. } => write!(f, "research"),
        }
    }
}

/// How a workflow ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Completed,
    /// The runtime returned, but some tasks failed or never reported.
    PartiallyCompleted {
        failed_tasks: Vec<String>,
        missing_tasks: Vec<String>,
    },
    Failed { reason: String },
}

/// Result of one workflow run. Always carries the requested type or topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowReport {
    #[serde(flatten)]
    pub workflow: WorkflowKind,
    /// Identity of the crew that ran; absent when the crew could not be built.
    pub crew_id: Option<Uuid>,
    pub status: WorkflowStatus,
    pub result: Option<CrewOutput>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl WorkflowReport {
    pub fn is_success(&self) -> bool {
        self.status == WorkflowStatus::Completed
    }

    /// The crew output if every task completed, otherwise an error naming
    /// what went wrong. Partial output stays readable through `result`.
    pub fn into_result(self) -> JarvisResult<CrewOutput> {
        match (self.status, self.result) {
            (WorkflowStatus::Failed { reason }, _) => Err(JarvisError::Runtime(reason)),
            (
                WorkflowStatus::PartiallyCompleted {
                    failed_tasks,
                    missing_tasks,
                },
                _,
            ) => Err(JarvisError::Runtime(format!(
                "{} workflow partially completed (failed: [{}], missing: [{}])",
                self.workflow,
                failed_tasks.join(", "),
                missing_tasks.join(", ")
            ))),
            (WorkflowStatus::Completed, Some(output)) => Ok(output),
            (_, None) => Err(JarvisError::Runtime(format!(
                "{} workflow produced no output",
                self.workflow
            ))),
        }
    }
}

/// Derive the workflow status from the runtime's per-task report.
///
/// A runtime that does not itemise tasks is trusted on its final answer.
pub fn status_for(crew: &Crew, output: &CrewOutput) -> WorkflowStatus {
    if output.tasks_output.is_empty() {
        return WorkflowStatus::Completed;
    }

    let failed_tasks: Vec<String> = output
        .failed_tasks()
        .into_iter()
        .map(str::to_string)
        .collect();

    let missing_tasks: Vec<String> = crew
        .tasks
        .iter()
        .filter(|t| !output.tasks_output.iter().any(|o| o.name == t.name))
        .map(|t| t.name.clone())
        .collect();

    if failed_tasks.is_empty() && missing_tasks.is_empty() {
        return WorkflowStatus::Completed;
    }

    if failed_tasks.len() == output.tasks_output.len() {
        return WorkflowStatus::Failed {
            reason: format!("all {} reported tasks failed", failed_tasks.len()),
        };
    }

    WorkflowStatus::PartiallyCompleted {
        failed_tasks,
        missing_tasks,
    }
}

/// Builds the two fixed Jarvis crews without running them.
pub struct CrewPlanner {
    agents: AgentFactory,
    tasks: TaskFactory,
}

impl CrewPlanner {
    pub fn new(config: &JarvisConfig) -> Self {
        Self {
            agents: AgentFactory::new(config),
            tasks: TaskFactory::new(config.workspace.clone()),
        }
    }

    pub fn agents(&self) -> &AgentFactory {
        &self.agents
    }

    /// Commander, code analyst, researcher and documentation specialist.
    pub fn integration_crew(&self, integration_type: &str) -> JarvisResult<Crew> {
        let commander = self.agents.roo_commander();
        let analyst = self.agents.code_analyst();
        let researcher = self.agents.researcher();
        let writer = self.agents.documentation();

        let analysis = self.tasks.roo_analysis(commander.role);
        let integration = self.tasks.code_integration(analyst.role, integration_type);
        let docs = self
            .tasks
            .documentation(writer.role, &format!("{integration_type} Integration"));

        Crew::builder(CrewKind::Integration {
            integration_type: integration_type.to_string(),
        })
        .agent(commander)
        .agent(analyst)
        .agent(researcher)
        .agent(writer)
        .task(analysis)
        .task(integration)
        .task(docs)
        .build()
    }

    /// Researcher followed by the documentation specialist.
    pub fn research_crew(&self, research_topic: &str) -> JarvisResult<Crew> {
        let research = self.tasks.research(AgentRole::Researcher, research_topic);
        let docs = self.tasks.documentation(
            AgentRole::Documentation,
            &format!("{research_topic} Research"),
        );

        Crew::builder(CrewKind::Research {
            topic: research_topic.to_string(),
        })
        .agent(self.agents.researcher())
        .agent(self.agents.documentation())
        .task(research)
        .task(docs)
        .build()
    }
}

/// Assembles the Jarvis crews and runs them through a [`CrewRuntime`].
pub struct Orchestrator {
    planner: CrewPlanner,
    runtime: Arc<dyn CrewRuntime>,
}

impl Orchestrator {
    pub fn new(config: &JarvisConfig, runtime: Arc<dyn CrewRuntime>) -> Self {
        config.warn_on_gaps();
        Self {
            planner: CrewPlanner::new(config),
            runtime,
        }
    }

    pub fn agents(&self) -> &AgentFactory {
        self.planner.agents()
    }

    pub fn integration_crew(&self, integration_type: &str) -> JarvisResult<Crew> {
        self.planner.integration_crew(integration_type)
    }

    pub fn research_crew(&self, research_topic: &str) -> JarvisResult<Crew> {
        self.planner.research_crew(research_topic)
    }

    pub async fn execute_integration(&self, integration_type: &str) -> WorkflowReport {
        let workflow = WorkflowKind::Integration {
            integration_type: integration_type.to_string(),
        };
        self.execute(workflow, self.integration_crew(integration_type))
            .await
    }

    pub async fn execute_research(&self, research_topic: &str) -> WorkflowReport {
        let workflow = WorkflowKind::Research {
            research_topic: research_topic.to_string(),
        };
        self.execute(workflow, self.research_crew(research_topic))
            .await
    }

    async fn execute(&self, workflow: WorkflowKind, crew: JarvisResult<Crew>) -> WorkflowReport {
        let started_at = Utc::now();

        let crew = match crew {
            Ok(crew) => crew,
            Err(e) => {
                error!(workflow = %workflow, error = %e, "Crew assembly failed");
                return WorkflowReport {
                    workflow,
                    crew_id: None,
                    status: WorkflowStatus::Failed {
                        reason: e.to_string(),
                    },
                    result: None,
                    started_at,
                    finished_at: Utc::now(),
                };
            }
        };

        info!(
            workflow = %workflow,
            subject = %workflow.subject(),
            crew_id = %crew.id,
            agents = crew.agents.len(),
            tasks = crew.tasks.len(),
            runtime = %self.runtime.name(),
            "Kicking off crew"
        );

        let start = Instant::now();
        let outcome = self.runtime.kickoff(&crew).await;
        let duration_ms = start.elapsed().as_millis();

        let (status, result) = match outcome {
            Ok(output) => {
                let status = status_for(&crew, &output);
                match &status {
                    WorkflowStatus::Completed => {
                        info!(crew_id = %crew.id, duration_ms, "Crew completed");
                    }
                    WorkflowStatus::PartiallyCompleted {
                        failed_tasks,
                        missing_tasks,
                    } => {
                        warn!(
                            crew_id = %crew.id,
                            duration_ms,
                            failed = ?failed_tasks,
                            missing = ?missing_tasks,
                            "Crew partially completed"
                        );
                    }
                    WorkflowStatus::Failed { reason } => {
                        error!(crew_id = %crew.id, duration_ms, reason = %reason, "Crew failed");
                    }
                }
                (status, Some(output))
            }
            Err(e) => {
                error!(
                    crew_id = %crew.id,
                    duration_ms,
                    kind = e.kind(),
                    error = %e,
                    "Crew kickoff failed"
                );
                (
                    WorkflowStatus::Failed {
                        reason: e.to_string(),
                    },
                    None,
                )
            }
        };

        WorkflowReport {
            workflow,
            crew_id: Some(crew.id),
            status,
            result,
            started_at,
            finished_at: Utc::now(),
        }
    }
}
