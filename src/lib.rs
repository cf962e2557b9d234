//! # markup-tree
//!
//! A server-side retained widget tree that renders to markup and re-renders
//! only the parts that changed.
//!
//! Nodes live in a slotmap arena. Their children, attributes and style are
//! [`VersionedMap`](versioned::VersionedMap)s: every effective change bumps a
//! version and notifies the ancestors, and a render pass serializes the tree
//! while collecting the smallest set of nodes a client needs to patch. Events
//! reported by the client are routed by identifier to per-node connectors,
//! each holding one listener.
//!
//! ## Core Systems
//!
//! - **[`versioned`]**: change-counting ordered map
//! - **[`dom`]**: arena, tree operations, dirty propagation, render pass, queries
//! - **[`event`]**: event declarations, connectors, invocation
//! - **[`widget`]**: standard event set, layout helpers, text content
//! - **[`css`]**: inline style declaration parsing
//! - **[`session`]**: one tree per client, dispatch by identifier
//! - **[`config`]**: tree-wide settings
//! - **[`testing`]**: recording listeners for tests

// Foundation
pub mod error;
pub mod value;
pub mod versioned;
pub mod config;

// Core systems
pub mod css;
pub mod dom;
pub mod event;
pub mod widget;

// Client plumbing
pub mod session;
pub mod testing;

pub use config::Config;
pub use dom::{Child, ChildValue, Dom, Element, NodeId, RenderOutput};
pub use error::{Error, Result};
pub use session::Session;
pub use value::{Payload, Value};
