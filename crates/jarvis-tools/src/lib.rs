//! Tool catalogue and selection for Jarvis crews.
//!
//! The crew runtime owns the actual tool implementations. This crate only
//! describes them: which tools exist, which capability tags each one carries,
//! and which credentials must be present before a tool is offered to agents.
//!
//! # Main types
//!
//! - [`ToolKind`] — Every tool Jarvis can hand to the runtime.
//! - [`ToolDescriptor`] — Serializable description sent with a crew.
//! - [`ToolCapability`] — Tag used by agents to pick their tool subset.
//! - [`ToolRegistry`] — Ordered, credential-filtered tool list.

/// Capability tags and tag sets.
pub mod capability;
/// Tool kinds, runtime class names and descriptors.
pub mod catalog;
/// Database backend detection from a connection URL.
pub mod database;
/// Credential-driven tool selection.
pub mod registry;

pub use capability::{CapabilitySet, ToolCapability};
pub use catalog::{Credential, ToolDescriptor, ToolKind};
pub use database::DatabaseBackend;
pub use registry::{ToolRegistry, ToolSelection};
