//! End-to-end workflow tests.
//!
//! Runs the integration and research workflows against mock runtimes and
//! checks crew shape, tool partitioning and report status for success,
//! partial failure and fatal error.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use jarvis_core::{JarvisError, JarvisResult};
use jarvis_crew::*;
use jarvis_tools::ToolKind;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

// ---------------------------------------------------------------------------
// Mock runtimes
// ---------------------------------------------------------------------------

/// Completes every task and records the crews it was given.
#[derive(Default)]
struct RecordingRuntime {
    seen: Mutex<Vec<Crew>>,
}

#[async_trait]
impl CrewRuntime for RecordingRuntime {
    fn name(&self) -> &str {
        "recording"
    }

    async fn kickoff(&self, crew: &Crew) -> JarvisResult<CrewOutput> {
        self.seen.lock().await.push(crew.clone());
        let mut output = CrewOutput::new(format!("finished {}", crew.kind.subject()));
        for task in &crew.tasks {
            output = output.with_task(TaskOutput::completed(&task.name, "ok"));
        }
        Ok(output)
    }
}

/// Fails the named task, completes the rest.
struct FlakyRuntime {
    fail: &'static str,
}

#[async_trait]
impl CrewRuntime for FlakyRuntime {
    fn name(&self) -> &str {
        "flaky"
    }

    async fn kickoff(&self, crew: &Crew) -> JarvisResult<CrewOutput> {
        let mut output = CrewOutput::new("partial");
        for task in &crew.tasks {
            output = output.with_task(if task.name == self.fail {
                TaskOutput::failed(&task.name, "rate limited")
            } else {
                TaskOutput::completed(&task.name, "ok")
            });
        }
        Ok(output)
    }
}

/// Kickoff itself errors.
struct BrokenRuntime;

#[async_trait]
impl CrewRuntime for BrokenRuntime {
    fn name(&self) -> &str {
        "broken"
    }

    async fn kickoff(&self, _crew: &Crew) -> JarvisResult<CrewOutput> {
        Err(JarvisError::Runtime("worker pool exhausted".to_string()))
    }
}

fn config(vars: &[(&str, &str)]) -> JarvisConfig {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let mut config = JarvisConfig::from_lookup(|key| map.get(key).cloned());
    config.workspace = WorkspaceLayout::new("/srv/jarvis");
    config
}

// ---------------------------------------------------------------------------
// 1. Integration workflow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn integration_workflow_completes() {
    let runtime = Arc::new(RecordingRuntime::default());
    let orchestrator = Orchestrator::new(&config(&[]), runtime.clone());

    let report = orchestrator.execute_integration("Notion").await;

    assert_eq!(report.status, WorkflowStatus::Completed);
    assert_eq!(report.workflow.subject(), "Notion");
    assert_eq!(report.result.as_ref().unwrap().raw, "finished Notion");

    let seen = runtime.seen.lock().await;
    assert_eq!(seen.len(), 1);
    let crew = &seen[0];
    assert_eq!(Some(crew.id), report.crew_id);

    let roles: Vec<AgentRole> = crew.agents.iter().map(|a| a.role).collect();
    assert_eq!(
        roles,
        vec![
            AgentRole::RooCommander,
            AgentRole::CodeAnalyst,
            AgentRole::Researcher,
            AgentRole::Documentation,
        ]
    );
    assert_eq!(
        crew.task_names(),
        vec!["roo_analysis", "code_integration", "documentation"]
    );
    let task_agents: Vec<AgentRole> = crew.tasks.iter().map(|t| t.agent).collect();
    assert_eq!(
        task_agents,
        vec![
            AgentRole::RooCommander,
            AgentRole::CodeAnalyst,
            AgentRole::Documentation,
        ]
    );
    assert!(crew.tasks[2].description.contains("Notion Integration"));
    assert!(crew.tasks[0].description.contains("/srv/jarvis/.roo"));
    assert_eq!(crew.process, Process::Sequential);
}

// ---------------------------------------------------------------------------
// 2. Research workflow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn research_workflow_uses_two_agents() {
    let runtime = Arc::new(RecordingRuntime::default());
    let orchestrator = Orchestrator::new(&config(&[]), runtime.clone());

    let report = orchestrator.execute_research("vector databases").await;
    assert!(report.is_success());

    let seen = runtime.seen.lock().await;
    let crew = &seen[0];
    assert_eq!(crew.agents.len(), 2);
    assert_eq!(crew.task_names(), vec!["research", "documentation"]);
    assert!(crew.tasks[1].description.contains("vector databases Research"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["research_topic"], "vector databases");
    assert_eq!(json["status"], "completed");
}

// ---------------------------------------------------------------------------
// 3. Credentials decide which tools reach the agents
// ---------------------------------------------------------------------------

fn tool_kinds(agent: &AgentSpec) -> Vec<ToolKind> {
    agent.tools.iter().map(|t| t.kind).collect()
}

const CODE_ANALYST_TOOLS: [ToolKind; 7] = [
    ToolKind::FileRead,
    ToolKind::DirectoryRead,
    ToolKind::DirectorySearch,
    ToolKind::TxtSearch,
    ToolKind::JsonSearch,
    ToolKind::XmlSearch,
    ToolKind::CodeDocsSearch,
];

const DOCUMENTATION_TOOLS: [ToolKind; 7] = [
    ToolKind::FileRead,
    ToolKind::DirectoryRead,
    ToolKind::DirectorySearch,
    ToolKind::TxtSearch,
    ToolKind::MdxSearch,
    ToolKind::PdfSearch,
    ToolKind::DocxSearch,
];

#[tokio::test]
async fn agents_receive_keyword_partition_with_every_credential() {
    let cfg = config(&[
        ("SERPER_API_KEY", "serper"),
        ("FIRECRAWL_API_KEY", "fc"),
        ("DATABASE_URL", "postgresql://db/jarvis"),
    ]);
    let orchestrator = Orchestrator::new(&cfg, Arc::new(RecordingRuntime::default()));
    let crew = orchestrator.integration_crew("GitHub").unwrap();
    assert_eq!(orchestrator.agents().tools().len(), 22);

    let commander = crew.agent(AgentRole::RooCommander).unwrap();
    assert_eq!(tool_kinds(commander), orchestrator.agents().tools().kinds());

    let analyst = crew.agent(AgentRole::CodeAnalyst).unwrap();
    assert_eq!(tool_kinds(analyst), CODE_ANALYST_TOOLS.to_vec());

    let researcher = crew.agent(AgentRole::Researcher).unwrap();
    assert_eq!(
        tool_kinds(researcher),
        vec![
            ToolKind::DirectorySearch,
            ToolKind::TxtSearch,
            ToolKind::JsonSearch,
            ToolKind::MdxSearch,
            ToolKind::PdfSearch,
            ToolKind::DocxSearch,
            ToolKind::CsvSearch,
            ToolKind::XmlSearch,
            ToolKind::WebsiteSearch,
            ToolKind::ScrapeWebsite,
            ToolKind::FirecrawlCrawlWebsite,
            ToolKind::FirecrawlScrapeWebsite,
            ToolKind::FirecrawlSearch,
            ToolKind::CodeDocsSearch,
            ToolKind::GithubSearch,
            ToolKind::YoutubeChannelSearch,
            ToolKind::YoutubeVideoSearch,
            ToolKind::PgSearch,
        ]
    );

    let writer = crew.agent(AgentRole::Documentation).unwrap();
    assert_eq!(tool_kinds(writer), DOCUMENTATION_TOOLS.to_vec());
}

#[tokio::test]
async fn agents_receive_keyword_partition_without_credentials() {
    let orchestrator = Orchestrator::new(&config(&[]), Arc::new(RecordingRuntime::default()));
    let crew = orchestrator.research_crew("vector databases").unwrap();
    assert_eq!(orchestrator.agents().tools().len(), 17);

    let researcher = crew.agent(AgentRole::Researcher).unwrap();
    assert_eq!(
        tool_kinds(researcher),
        vec![
            ToolKind::DirectorySearch,
            ToolKind::TxtSearch,
            ToolKind::JsonSearch,
            ToolKind::MdxSearch,
            ToolKind::PdfSearch,
            ToolKind::DocxSearch,
            ToolKind::CsvSearch,
            ToolKind::XmlSearch,
            ToolKind::WebsiteSearch,
            ToolKind::ScrapeWebsite,
            ToolKind::CodeDocsSearch,
            ToolKind::GithubSearch,
            ToolKind::YoutubeChannelSearch,
            ToolKind::YoutubeVideoSearch,
        ]
    );

    let writer = crew.agent(AgentRole::Documentation).unwrap();
    assert_eq!(tool_kinds(writer), DOCUMENTATION_TOOLS.to_vec());
    assert_eq!(
        tool_kinds(&orchestrator.agents().code_analyst()),
        CODE_ANALYST_TOOLS.to_vec()
    );
    assert!(crew
        .agents
        .iter()
        .all(|a| !tool_kinds(a).contains(&ToolKind::SeleniumScraping)));
}

#[tokio::test]
async fn missing_credentials_remove_tools_from_every_agent() {
    let orchestrator = Orchestrator::new(&config(&[]), Arc::new(RecordingRuntime::default()));
    let crew = orchestrator.integration_crew("Slack").unwrap();
    for agent in &crew.agents {
        for tool in &agent.tools {
            assert!(tool.requires.is_none(), "{} leaked to {}", tool.name, agent.role);
        }
    }
}

// ---------------------------------------------------------------------------
// 4. Failure reporting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn partial_failure_is_reported() {
    let orchestrator = Orchestrator::new(
        &config(&[]),
        Arc::new(FlakyRuntime {
            fail: "documentation",
        }),
    );

    let report = orchestrator.execute_research("LLM routing").await;

    assert_eq!(
        report.status,
        WorkflowStatus::PartiallyCompleted {
            failed_tasks: vec!["documentation".to_string()],
            missing_tasks: vec![],
        }
    );
    assert_eq!(report.workflow.subject(), "LLM routing");
    assert!(!report.is_success());
    // partial output stays on the report, but is not an Ok result
    assert_eq!(report.result.as_ref().unwrap().raw, "partial");
    let err = report.into_result().unwrap_err();
    assert!(err.to_string().contains("documentation"));
}

#[tokio::test]
async fn kickoff_error_is_fatal_and_keeps_topic() {
    let orchestrator = Orchestrator::new(&config(&[]), Arc::new(BrokenRuntime));

    let report = orchestrator.execute_integration("Jira").await;

    assert!(matches!(report.status, WorkflowStatus::Failed { ref reason } if reason.contains("worker pool")));
    assert!(report.result.is_none());
    assert!(report.crew_id.is_some());
    assert_eq!(
        report.workflow,
        WorkflowKind::Integration {
            integration_type: "Jira".to_string()
        }
    );
    assert!(report.finished_at >= report.started_at);
    assert!(report.into_result().is_err());
}
