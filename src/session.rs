//! Session: one widget tree with its identifier registry, driven by a
//! transport.
//!
//! [`Session`] owns the [`Dom`] for one client. A transport resolves remote
//! calls through it by identifier and asks it for render passes; nothing here
//! is shared between sessions.

use tracing::debug;

use crate::config::Config;
use crate::dom::node::{Element, NodeData, NodeId};
use crate::dom::render::RenderOutput;
use crate::dom::tree::Dom;
use crate::error::{Error, Result};
use crate::value::{Payload, Value};

/// A widget tree and its root, scoped to one client.
#[derive(Debug)]
pub struct Session {
    dom: Dom,
    root: Option<NodeId>,
    /// Root refresh counter at the last render.
    seen_refresh: u64,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            dom: Dom::with_config(config),
            root: None,
            seen_refresh: 0,
        }
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    /// Insert a node into this session's tree.
    pub fn insert(&mut self, element: Element) -> NodeId {
        self.dom.insert(element)
    }

    /// Make `id` the node served to the client.
    pub fn set_root(&mut self, id: NodeId) -> Result<()> {
        self.seen_refresh = self.dom.get(id).ok_or(Error::NodeNotFound(id))?.refresh_requests();
        self.root = Some(id);
        Ok(())
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Resolve a client-supplied identifier.
    pub fn resolve(&self, identifier: &str) -> Result<NodeId> {
        self.dom
            .resolve(identifier)
            .ok_or_else(|| Error::UnknownIdentifier(identifier.to_owned()))
    }

    /// Handle a remote event call: resolve the emitter, then invoke.
    pub fn dispatch(&mut self, identifier: &str, event: &str, args: &[Value]) -> Result<Payload> {
        let id = self.resolve(identifier)?;
        debug!(%identifier, event, args = args.len(), "dispatching remote event");
        self.dom.invoke(id, event, args)
    }

    /// Render the root. Without a root the output is empty.
    pub fn render(&mut self) -> Result<RenderOutput> {
        let Some(root) = self.root else {
            return Ok(RenderOutput::default());
        };
        let output = self.dom.render(root)?;
        self.seen_refresh = self.dom.get(root).map_or(0, NodeData::refresh_requests);
        Ok(output)
    }

    /// Render and return the change set keyed by identifier.
    pub fn patches(&mut self) -> Result<Vec<(String, String)>> {
        let output = self.render()?;
        Ok(output.patches(&self.dom))
    }

    /// Whether anything under the root changed since the last render.
    pub fn needs_render(&self) -> bool {
        self.root.is_some_and(|root| self.dom.needs_render(root))
    }

    /// Whether the root received refresh notifications since the last render.
    pub fn has_pending_refresh(&self) -> bool {
        self.root
            .and_then(|root| self.dom.get(root))
            .is_some_and(|n| n.refresh_requests() != self.seen_refresh)
    }

    /// Permanently destroy the node registered under `identifier` and its
    /// subtree, evicting their registry entries.
    pub fn destroy(&mut self, identifier: &str) -> Result<()> {
        let id = self.resolve(identifier)?;
        self.dom.remove(id);
        if self.root == Some(id) {
            self.root = None;
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::events::ONCLICK;

    fn session() -> (Session, NodeId, NodeId) {
        let mut s = Session::default();
        let root = s.insert(Element::widget().with_identifier("root"));
        let button = s.insert(Element::widget_tag("button").with_identifier("ok"));
        s.dom_mut().append(root, button, "").unwrap();
        s.set_root(root).unwrap();
        (s, root, button)
    }

    #[test]
    fn render_without_root_is_empty() {
        let mut s = Session::default();
        let out = s.render().unwrap();
        assert!(out.markup.is_empty());
        assert!(out.is_clean());
    }

    #[test]
    fn dispatch_resolves_identifier() {
        let (mut s, ..) = session();
        assert!(s.dispatch("ok", ONCLICK, &[]).unwrap().is_empty());
        assert_eq!(
            s.dispatch("ghost", ONCLICK, &[]),
            Err(Error::UnknownIdentifier("ghost".into()))
        );
    }

    #[test]
    fn patches_after_change() {
        let (mut s, _root, button) = session();
        s.render().unwrap();
        assert!(!s.needs_render());
        assert!(!s.has_pending_refresh());
        s.dom_mut().set_text(button, "OK").unwrap();
        assert!(s.needs_render());
        assert!(s.has_pending_refresh());
        let patches = s.patches().unwrap();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].0, "ok");
        assert!(patches[0].1.ends_with(">OK</button>"));
        assert!(!s.has_pending_refresh());
    }

    #[test]
    fn destroy_evicts_identifier() {
        let (mut s, ..) = session();
        s.destroy("ok").unwrap();
        assert!(s.resolve("ok").is_err());
        s.destroy("root").unwrap();
        assert_eq!(s.root(), None);
    }
}
