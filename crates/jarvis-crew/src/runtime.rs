use crate::crew::Crew;
use async_trait::async_trait;
use jarvis_core::JarvisResult;
use serde::{Deserialize, Serialize};

/// The agent framework that actually runs a crew.
///
/// Reasoning, tool calls and agent memory all happen behind this trait.
/// Jarvis only assembles the crew and reads back the outcome.
#[async_trait]
pub trait CrewRuntime: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Run every task of `crew` in its process order.
    async fn kickoff(&self, crew: &Crew) -> JarvisResult<CrewOutput>;
}

/// Outcome of a single task as reported by the runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOutcome {
    #[default]
    Completed,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutput {
    /// Name of the [`TaskSpec`](crate::tasks::TaskSpec) this output belongs to.
    pub name: String,
    /// Role or title of the agent that ran the task.
    #[serde(default)]
    pub agent: String,
    #[serde(default)]
    pub raw: String,
    #[serde(default)]
    pub status: TaskOutcome,
}

impl TaskOutput {
    pub fn completed(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agent: String::new(),
            raw: raw.into(),
            status: TaskOutcome::Completed,
        }
    }

    pub fn failed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            agent: String::new(),
            raw: String::new(),
            status: TaskOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, TaskOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// What `kickoff` hands back: the final answer plus per-task detail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrewOutput {
    /// Output of the last task, which is the crew's answer.
    pub raw: String,
    #[serde(default)]
    pub tasks_output: Vec<TaskOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_usage: Option<TokenUsage>,
}

impl CrewOutput {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            ..Self::default()
        }
    }

    pub fn with_task(mut self, output: TaskOutput) -> Self {
        self.tasks_output.push(output);
        self
    }

    pub fn failed_tasks(&self) -> Vec<&str> {
        self.tasks_output
            .iter()
            .filter(|t| t.is_failed())
            .map(|t| t.name.as_str())
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_output_parses() {
        let output: CrewOutput = serde_json::from_str(r#"{"raw": "done"}"#).unwrap();
        assert_eq!(output.raw, "done");
        assert!(output.tasks_output.is_empty());
        assert!(output.token_usage.is_none());
    }

    #[test]
    fn test_task_status_defaults_to_completed() {
        let output: TaskOutput = serde_json::from_str(r#"{"name": "research"}"#).unwrap();
        assert_eq!(output.status, TaskOutcome::Completed);
    }

    #[test]
    fn test_failed_status_parses() {
        let output: TaskOutput = serde_json::from_str(
            r#"{"name": "documentation", "status": {"failed": {"reason": "rate limited"}}}"#,
        )
        .unwrap();
        assert!(output.is_failed());
    }

    #[test]
    fn test_failed_tasks() {
        let output = CrewOutput::new("partial")
            .with_task(TaskOutput::completed("research", "notes"))
            .with_task(TaskOutput::failed("documentation", "timeout"));
        assert_eq!(output.failed_tasks(), vec!["documentation"]);
    }
}
