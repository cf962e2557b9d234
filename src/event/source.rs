//! Event declarations and the per-node connector table.

use std::fmt;

use indexmap::IndexMap;

use super::connector::EventConnector;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::Result;
use crate::value::{Payload, Value};

/// Method bound to an event. Receives the owner and the call arguments and
/// returns the event payload (empty for "no data").
pub type EventMethod = fn(&mut Dom, NodeId, &[Value]) -> Result<Payload>;

/// Return the call arguments unchanged as the payload.
pub fn forward(_dom: &mut Dom, _owner: NodeId, args: &[Value]) -> Result<Payload> {
    Ok(args.to_vec())
}

/// Static description of one event.
#[derive(Clone, Copy)]
pub struct EventDecl {
    pub name: &'static str,
    /// Declared parameter names; invocation must pass exactly this many
    /// arguments.
    pub params: &'static [&'static str],
    /// Client code with `{emitter_identifier}` and `{event_name}`
    /// placeholders.
    pub client_trigger: Option<&'static str>,
    pub method: EventMethod,
}

impl EventDecl {
    pub const fn new(
        name: &'static str,
        params: &'static [&'static str],
        method: EventMethod,
    ) -> Self {
        Self {
            name,
            params,
            client_trigger: None,
            method,
        }
    }

    pub const fn with_client_trigger(mut self, template: &'static str) -> Self {
        self.client_trigger = Some(template);
        self
    }
}

impl fmt::Debug for EventDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDecl")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("client_trigger", &self.client_trigger.is_some())
            .finish()
    }
}

/// The connectors installed on one node, keyed by event name.
#[derive(Debug, Default)]
pub struct EventSource {
    connectors: IndexMap<&'static str, EventConnector>,
}

impl EventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create one connector per declaration for `owner`.
    ///
    /// Names that already have a connector are skipped, so repeated
    /// installation never wraps an event twice. Returns how many were added.
    pub fn install(&mut self, owner: NodeId, decls: &[EventDecl]) -> usize {
        let mut added = 0;
        for decl in decls {
            if self.connectors.contains_key(decl.name) {
                continue;
            }
            self.connectors
                .insert(decl.name, EventConnector::new(owner, *decl));
            added += 1;
        }
        added
    }

    pub fn get(&self, name: &str) -> Option<&EventConnector> {
        self.connectors.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut EventConnector> {
        self.connectors.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.connectors.contains_key(name)
    }

    /// Event names in installation order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.connectors.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}
