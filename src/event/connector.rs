//! One event on one node: its declaration and the listener slot.

use std::fmt;
use std::rc::Rc;

use super::source::EventDecl;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::value::Value;

/// Listener callback. Receives the emitter and the assembled arguments.
///
/// Shared so a delivery can run while the slot stays filled; a listener that
/// invokes its own event again is called again.
pub type Callback = Rc<dyn Fn(&mut Dom, NodeId, &[Value])>;

/// A callback together with the fixed arguments bound at connect time.
#[derive(Clone)]
pub struct Listener {
    callback: Callback,
    fixed: Vec<Value>,
}

impl Listener {
    pub fn new(
        callback: impl Fn(&mut Dom, NodeId, &[Value]) + 'static,
        fixed: Vec<Value>,
    ) -> Self {
        Self {
            callback: Rc::new(callback),
            fixed,
        }
    }

    pub fn fixed(&self) -> &[Value] {
        &self.fixed
    }

    /// Arguments handed to the callback for `payload`.
    ///
    /// A non-empty payload comes first, followed by the fixed arguments. An
    /// empty payload means the event carries no data, and the callback gets
    /// the fixed arguments alone.
    pub fn call_args(&self, payload: &[Value]) -> Vec<Value> {
        if payload.is_empty() {
            return self.fixed.clone();
        }
        let mut args = Vec::with_capacity(payload.len() + self.fixed.len());
        args.extend_from_slice(payload);
        args.extend_from_slice(&self.fixed);
        args
    }

    pub(crate) fn call(&self, dom: &mut Dom, emitter: NodeId, payload: &[Value]) {
        let args = self.call_args(payload);
        (self.callback)(dom, emitter, &args);
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("fixed", &self.fixed)
            .finish_non_exhaustive()
    }
}

/// Fill `{name}` placeholders in one pass over `template`.
///
/// Substituted values are never rescanned, so a value that itself reads like
/// a placeholder is emitted verbatim. Unknown `{...}` text is kept as is.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let hit = values.iter().find(|(name, _)| {
            tail.strip_prefix('{')
                .and_then(|t| t.strip_prefix(*name))
                .is_some_and(|t| t.starts_with('}'))
        });
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 2..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Per-node connector for a single event.
///
/// Holds at most one listener. Connecting again replaces the previous
/// listener.
#[derive(Debug)]
pub struct EventConnector {
    owner: NodeId,
    decl: EventDecl,
    listener: Option<Listener>,
}

impl EventConnector {
    pub fn new(owner: NodeId, decl: EventDecl) -> Self {
        Self {
            owner,
            decl,
            listener: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.decl.name
    }

    pub fn params(&self) -> &'static [&'static str] {
        self.decl.params
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn decl(&self) -> &EventDecl {
        &self.decl
    }

    pub fn client_trigger(&self) -> Option<&'static str> {
        self.decl.client_trigger
    }

    /// The client trigger with its placeholders filled in.
    pub fn client_trigger_for(&self, emitter_identifier: &str) -> Option<String> {
        self.decl.client_trigger.map(|template| {
            fill_placeholders(
                template,
                &[
                    ("emitter_identifier", emitter_identifier),
                    ("event_name", self.decl.name),
                ],
            )
        })
    }

    pub fn is_connected(&self) -> bool {
        self.listener.is_some()
    }

    pub fn listener(&self) -> Option<&Listener> {
        self.listener.as_ref()
    }

    /// Install `listener`. Returns whether a previous one was replaced.
    pub(crate) fn set_listener(&mut self, listener: Listener) -> bool {
        self.listener.replace(listener).is_some()
    }

    /// Drop the listener. Returns whether one was connected.
    pub(crate) fn clear_listener(&mut self) -> bool {
        self.listener.take().is_some()
    }
}
