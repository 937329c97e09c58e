use crate::agents::{AgentRole, AgentSpec};
use crate::tasks::TaskSpec;
use chrono::{DateTime, Utc};
use jarvis_core::{JarvisError, JarvisResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Execution order policy. Only sequential execution is used by Jarvis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Process {
    #[default]
    Sequential,
}

/// What a crew was assembled for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CrewKind {
    Integration { integration_type: String },
    Research { topic: String },
}

impl CrewKind {
    /// The integration type or research topic.
    pub fn subject(&self) -> &str {
        match self {
            CrewKind::Integration { integration_type } => integration_type,
            CrewKind::Research { topic } => topic,
        }
    }
}

/// Agents, tasks and a process policy, kicked off once and then dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Crew {
    pub id: Uuid,
    #[serde(flatten)]
    pub kind: CrewKind,
    pub agents: Vec<AgentSpec>,
    pub tasks: Vec<TaskSpec>,
    pub process: Process,
    pub verbose: bool,
    pub memory: bool,
    pub created_at: DateTime<Utc>,
}

impl Crew {
    pub fn builder(kind: CrewKind) -> CrewBuilder {
        CrewBuilder::new(kind)
    }

    pub fn agent(&self, role: AgentRole) -> Option<&AgentSpec> {
        self.agents.iter().find(|a| a.role == role)
    }

    pub fn task_names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Collects agents and tasks, validating the pairing on [`CrewBuilder::build`].
pub struct CrewBuilder {
    kind: CrewKind,
    agents: Vec<AgentSpec>,
    tasks: Vec<TaskSpec>,
    process: Process,
    verbose: bool,
    memory: bool,
}

impl CrewBuilder {
    pub fn new(kind: CrewKind) -> Self {
        Self {
            kind,
            agents: Vec::new(),
            tasks: Vec::new(),
            process: Process::Sequential,
            verbose: true,
            memory: true,
        }
    }

    pub fn agent(mut self, agent: AgentSpec) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn task(mut self, task: TaskSpec) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn memory(mut self, memory: bool) -> Self {
        self.memory = memory;
        self
    }

    pub fn build(self) -> JarvisResult<Crew> {
        if self.agents.is_empty() {
            return Err(JarvisError::Crew("crew has no agents".to_string()));
        }
        if self.tasks.is_empty() {
            return Err(JarvisError::Crew("crew has no tasks".to_string()));
        }

        let mut roles = HashSet::new();
        for agent in &self.agents {
            if !roles.insert(agent.role) {
                return Err(JarvisError::Crew(format!(
                    "agent role {} appears more than once",
                    agent.role
                )));
            }
        }

        for task in &self.tasks {
            if !roles.contains(&task.agent) {
                return Err(JarvisError::Crew(format!(
                    "task '{}' is assigned to {}, which is not in the crew",
                    task.name, task.agent
                )));
            }
        }

        Ok(Crew {
            id: Uuid::new_v4(),
            kind: self.kind,
            agents: self.agents,
            tasks: self.tasks,
            process: self.process,
            verbose: self.verbose,
            memory: self.memory,
            created_at: Utc::now(),
        })
    }
}
