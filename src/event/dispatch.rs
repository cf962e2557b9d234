//! Connecting listeners to node events and invoking them.

use tracing::{debug, trace};

use super::connector::Listener;
use super::source::EventDecl;
use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::{Error, Result};
use crate::value::{Payload, Value};

impl Dom {
    /// Install additional event declarations on a node.
    ///
    /// Names already installed are left alone. Returns how many connectors
    /// were created.
    pub fn install_events(&mut self, id: NodeId, decls: &[EventDecl]) -> Result<usize> {
        Ok(self.node_mut(id)?.events.install(id, decls))
    }

    /// Connect `callback` to `event` on `id`, with no fixed arguments.
    pub fn connect(
        &mut self,
        id: NodeId,
        event: &str,
        callback: impl Fn(&mut Dom, NodeId, &[Value]) + 'static,
    ) -> Result<()> {
        self.connect_with(id, event, callback, Vec::new())
    }

    /// Connect `callback` to `event` on `id`, binding `fixed` arguments.
    ///
    /// A previous listener is replaced. If the event has a client trigger, the
    /// formatted trigger is written to the attribute named after the event.
    pub fn connect_with(
        &mut self,
        id: NodeId,
        event: &str,
        callback: impl Fn(&mut Dom, NodeId, &[Value]) + 'static,
        fixed: Vec<Value>,
    ) -> Result<()> {
        let node = self.node(id)?;
        let identifier = node.identifier().to_owned();
        let connector = node.events.get(event).ok_or_else(|| Error::UnknownEvent {
            node: identifier.clone(),
            event: event.to_owned(),
        })?;
        let name = connector.name();
        let trigger = connector.client_trigger_for(&identifier);

        if let Some(code) = trigger {
            self.set_attribute(id, name, code)?;
        }

        let replaced = self
            .node_mut(id)?
            .events
            .get_mut(name)
            .map(|c| c.set_listener(Listener::new(callback, fixed)))
            .unwrap_or_default();
        if replaced {
            debug!(node = %identifier, event = name, "listener replaced");
        }
        Ok(())
    }

    /// Clear the listener slot of `event`. The client trigger attribute stays.
    ///
    /// Returns whether a listener was connected.
    pub fn disconnect(&mut self, id: NodeId, event: &str) -> Result<bool> {
        let node = self.node_mut(id)?;
        let identifier = node.identifier().to_owned();
        let connector = node
            .events
            .get_mut(event)
            .ok_or_else(|| Error::UnknownEvent {
                node: identifier,
                event: event.to_owned(),
            })?;
        Ok(connector.clear_listener())
    }

    /// Invoke `event` on `id` with `args`.
    ///
    /// Runs the bound method, then passes its payload to the listener if one
    /// is connected. The payload is returned either way. A listener may invoke
    /// its own event again; the nested call delivers to it as well.
    pub fn invoke(&mut self, id: NodeId, event: &str, args: &[Value]) -> Result<Payload> {
        let node = self.node(id)?;
        let identifier = node.identifier();
        let connector = node.events.get(event).ok_or_else(|| Error::UnknownEvent {
            node: identifier.to_owned(),
            event: event.to_owned(),
        })?;
        let decl = *connector.decl();
        if args.len() != decl.params.len() {
            return Err(Error::ArgumentMismatch {
                event: decl.name.to_owned(),
                expected: decl.params.len(),
                found: args.len(),
            });
        }

        let payload = (decl.method)(self, id, args)?;

        // The method may have removed the node or its event. The listener is
        // cloned out so the slot stays filled while it runs.
        let listener = self
            .nodes
            .get(id)
            .and_then(|n| n.events.get(decl.name))
            .and_then(|c| c.listener().cloned());
        if let Some(listener) = listener {
            trace!(event = decl.name, payload = payload.len(), "delivering to listener");
            listener.call(self, id, &payload);
        }
        Ok(payload)
    }

    /// Whether `event` on `id` has a listener.
    pub fn is_connected(&self, id: NodeId, event: &str) -> bool {
        self.get(id)
            .and_then(|n| n.events.get(event))
            .is_some_and(|c| c.is_connected())
    }
}
