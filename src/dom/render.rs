//! Render pass: serialize a subtree and collect the nodes whose markup changed.
//!
//! Each node keeps the markup captured by its last render. A pass walks the
//! subtree in render order; clean nodes with clean descendants reuse their
//! cached markup, everything else is rebuilt. A dirty node records itself in
//! the change set and drops its descendants' records, so the change set never
//! holds a node together with one of its ancestors.

use indexmap::IndexMap;
use tracing::debug;

use super::node::{Child, NodeId};
use super::tree::Dom;
use crate::error::Result;

/// Result of one render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOutput {
    /// Full markup of the rendered subtree.
    pub markup: String,
    /// Nodes to patch, with their new markup, in traversal order.
    pub changed: IndexMap<NodeId, String>,
}

impl RenderOutput {
    /// Whether nothing needs patching.
    pub fn is_clean(&self) -> bool {
        self.changed.is_empty()
    }

    /// The change set keyed by node identifier, for a transport to apply.
    ///
    /// Nodes destroyed since the pass are skipped.
    pub fn patches(&self, dom: &Dom) -> Vec<(String, String)> {
        self.changed
            .iter()
            .filter_map(|(id, markup)| {
                dom.get(*id)
                    .map(|n| (n.identifier().to_owned(), markup.clone()))
            })
            .collect()
    }
}

impl Dom {
    /// Render the subtree under `id`.
    ///
    /// Every node in the subtree is clean afterwards.
    pub fn render(&mut self, id: NodeId) -> Result<RenderOutput> {
        let mut changed = IndexMap::new();
        let markup = self.render_into(id, &mut changed)?;
        debug!(
            root = %self.node(id)?.identifier(),
            changed = changed.len(),
            "render pass"
        );
        Ok(RenderOutput { markup, changed })
    }

    /// Render the subtree under `id`, adding changed nodes to `changed`.
    pub fn render_into(
        &mut self,
        id: NodeId,
        changed: &mut IndexMap<NodeId, String>,
    ) -> Result<String> {
        self.node(id)?;
        Ok(self.render_node(id, changed))
    }

    fn render_node(&mut self, id: NodeId, changed: &mut IndexMap<NodeId, String>) -> String {
        let Some(node) = self.nodes.get(id) else {
            return String::new();
        };
        let children: Vec<Child> = node
            .render_order
            .iter()
            .filter_map(|key| node.children.get(key).cloned())
            .collect();

        let mut local = IndexMap::new();
        let mut inner = String::new();
        for child in children {
            match child {
                Child::Node(child) => inner.push_str(&self.render_node(child, &mut local)),
                Child::Text(text) => inner.push_str(&text),
            }
        }

        let Some(node) = self.nodes.get_mut(id) else {
            return String::new();
        };
        let dirty = node.is_dirty();
        if dirty || !local.is_empty() {
            node.cached_markup = node.wrap(&inner);
        }
        if dirty {
            changed.insert(id, node.cached_markup.clone());
            node.mark_seen();
        } else {
            changed.extend(local);
        }
        node.cached_markup.clone()
    }

    /// Whether any node in the subtree under `id` changed since it was last
    /// rendered.
    pub fn needs_render(&self, id: NodeId) -> bool {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            if node.is_dirty() {
                return true;
            }
            stack.extend(node.children.values().filter_map(Child::as_node));
        }
        false
    }
}
