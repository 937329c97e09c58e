//! Crew assembly for the Jarvis assistant.
//!
//! Reads configuration, picks tools, stamps out the four Jarvis agents and
//! their task prompts, groups them into crews, and hands each crew to a
//! [`CrewRuntime`] for execution. The runtime owns reasoning, tool calls and
//! memory; this crate only decides *what* runs.
//!
//! # Main types
//!
//! - [`JarvisConfig`] — Explicit configuration, loaded from TOML and the environment.
//! - [`AgentFactory`] — Builds [`AgentSpec`]s with capability-filtered tools.
//! - [`TaskFactory`] — Builds [`TaskSpec`] prompt templates.
//! - [`Crew`] — Agents + tasks + process policy, validated by [`CrewBuilder`].
//! - [`CrewRuntime`] — Seam to the agent framework; [`HttpCrewRuntime`] talks to a crew service.
//! - [`Orchestrator`] — Runs the integration and research workflows into a [`WorkflowReport`].

/// Agent roles, templates and the agent factory.
pub mod agents;
/// Configuration loading from TOML, `.env` and the environment.
pub mod config;
/// Crew records and validation.
pub mod crew;
/// Workflow orchestration and status reporting.
pub mod engine;
/// HTTP client for a remote crew service.
pub mod http;
/// Crew runtime trait and output types.
pub mod runtime;
/// Task prompt templates.
pub mod tasks;

pub use agents::{AgentFactory, AgentRole, AgentSpec};
pub use config::{ApiKeys, JarvisConfig, ModelConfig, ModelProvider, RuntimeConfig, WorkspaceLayout};
pub use crew::{Crew, CrewBuilder, CrewKind, Process};
pub use engine::{status_for, CrewPlanner, Orchestrator, WorkflowKind, WorkflowReport, WorkflowStatus};
pub use http::HttpCrewRuntime;
pub use runtime::{CrewOutput, CrewRuntime, TaskOutcome, TaskOutput, TokenUsage};
pub use tasks::{TaskFactory, TaskSpec};
