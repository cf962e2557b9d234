//! Tree operations: insert, identify, attach, detach, mutate, propagate.

use std::collections::{HashMap, HashSet, VecDeque};

use slotmap::{Key, SlotMap};
use tracing::{trace, warn};

use super::node::{Child, Element, NodeData, NodeId, WidgetState};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::widget::events::STANDARD_EVENTS;

/// Value accepted by [`Dom::add_child`]: one child, or a collection of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildValue {
    Single(Child),
    /// Elements keyed `"{key}{index}"`.
    List(Vec<ChildValue>),
    /// Elements keyed by their own keys; the base key is ignored.
    Keyed(Vec<(String, ChildValue)>),
}

impl ChildValue {
    pub fn list<T: Into<ChildValue>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn keyed<K: Into<String>, T: Into<ChildValue>>(
        items: impl IntoIterator<Item = (K, T)>,
    ) -> Self {
        Self::Keyed(
            items
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<Child> for ChildValue {
    fn from(child: Child) -> Self {
        Self::Single(child)
    }
}

impl From<NodeId> for ChildValue {
    fn from(id: NodeId) -> Self {
        Self::Single(Child::Node(id))
    }
}

impl From<&str> for ChildValue {
    fn from(text: &str) -> Self {
        Self::Single(Child::from(text))
    }
}

impl From<String> for ChildValue {
    fn from(text: String) -> Self {
        Self::Single(Child::Text(text))
    }
}

/// The node arena together with its identifier registry.
///
/// All nodes live in a single `SlotMap`. Parent links are plain keys, so a
/// child never keeps its parent alive and upward walks are iterative. The
/// registry maps identifiers to keys for remote event dispatch; it is owned
/// here rather than held as process-wide state, and entries disappear only
/// when [`remove`](Dom::remove) destroys a node.
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    registry: HashMap<String, NodeId>,
    config: Config,
}

impl Dom {
    /// Create an empty DOM with default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            registry: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create a detached node from `element` and register its identifier.
    ///
    /// Attributes go in as `id`, then the element's own attributes, then
    /// `class`. Widgets additionally get the configured margin, their size and
    /// style, and the standard event set.
    pub fn insert(&mut self, element: Element) -> NodeId {
        let widget = element.widget.then(|| WidgetState {
            layout: element.layout.unwrap_or(self.config.default_layout),
        });
        let id = self.nodes.insert(NodeData::new(element.tag, widget));
        let identifier = element
            .identifier
            .unwrap_or_else(|| self.generated_identifier(id));
        let default_margin = self.config.default_margin.clone();

        let node = &mut self.nodes[id];
        node.attributes.set("id".to_owned(), Some(identifier));
        node.attributes.extend(element.attributes);
        node.classes = element.classes;
        let class = node.class_attribute();
        node.attributes.set("class".to_owned(), Some(class));

        if node.widget.is_some() {
            if let Some(margin) = default_margin {
                node.style.set("margin".to_owned(), margin);
            }
            if let Some(width) = element.width {
                node.style.set("width".to_owned(), width.to_css());
            }
            if let Some(height) = element.height {
                node.style.set("height".to_owned(), height.to_css());
            }
            node.style.extend(element.style);
            node.events.install(id, STANDARD_EVENTS);
        } else {
            node.style.extend(element.style);
        }
        node.refresh_attribute_string();
        // Detached; nothing upstream to tell.
        node.take_changes();

        let identifier = node.identifier().to_owned();
        self.register(identifier, id);
        id
    }

    /// Identifier derived from the arena key, with the configured prefix.
    fn generated_identifier(&self, id: NodeId) -> String {
        let raw = id.data().as_ffi();
        match &self.config.identifier_prefix {
            Some(prefix) => format!("{prefix}{raw}"),
            None => raw.to_string(),
        }
    }

    fn register(&mut self, identifier: String, id: NodeId) {
        if let Some(previous) = self.registry.insert(identifier.clone(), id) {
            if previous != id && self.nodes.contains_key(previous) {
                warn!(%identifier, "identifier reassigned to a different live node");
            }
        }
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&NodeData> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// Whether the DOM contains a node with the given key.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Resolve an identifier through the registry.
    pub fn resolve(&self, identifier: &str) -> Option<NodeId> {
        self.registry
            .get(identifier)
            .copied()
            .filter(|id| self.nodes.contains_key(*id))
    }

    /// Number of registry entries, stale aliases included.
    pub fn registry_len(&self) -> usize {
        self.registry.len()
    }

    pub fn identifier(&self, id: NodeId) -> Result<&str> {
        Ok(self.node(id)?.identifier())
    }

    /// Change a node's identifier.
    ///
    /// The new identifier is registered; the old entry stays and keeps
    /// resolving to this node.
    pub fn set_identifier(&mut self, id: NodeId, identifier: impl Into<String>) -> Result<()> {
        let identifier = identifier.into();
        self.set_attribute(id, "id", identifier.clone())?;
        self.register(identifier, id);
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Walk from `id` up to the root, collecting ancestor keys.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent(current) {
            result.push(p);
            current = p;
        }
        result
    }

    // -----------------------------------------------------------------------
    // Children
    // -----------------------------------------------------------------------

    /// Add a child under `key`.
    ///
    /// Re-adding an existing key moves it to the end of the render order. A
    /// node child gets its parent link and a `data-parent-widget` attribute;
    /// if it was attached elsewhere it is detached first, since a node has at
    /// most one parent slot.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        key: impl Into<String>,
        value: impl Into<ChildValue>,
    ) -> Result<()> {
        let key = key.into();
        match value.into() {
            ChildValue::Single(child) => self.add_single_child(parent, key, child),
            ChildValue::List(items) => {
                for (i, item) in items.into_iter().enumerate() {
                    self.add_child(parent, format!("{key}{i}"), item)?;
                }
                Ok(())
            }
            ChildValue::Keyed(items) => {
                for (k, item) in items {
                    self.add_child(parent, k, item)?;
                }
                Ok(())
            }
        }
    }

    fn add_single_child(&mut self, parent: NodeId, key: String, child: Child) -> Result<()> {
        let parent_identifier = self.node(parent)?.identifier().to_owned();

        if let Child::Node(node) = &child {
            let node = *node;
            let node_identifier = self.node(node)?.identifier().to_owned();
            if node == parent || self.ancestors(parent).contains(&node) {
                return Err(Error::Cycle {
                    parent: parent_identifier,
                    child: node_identifier,
                });
            }
            if let Some(old_parent) = self.parent(node) {
                let old_key = self.key_of(old_parent, node);
                if old_parent != parent || old_key.as_deref() != Some(key.as_str()) {
                    if let Some(old_key) = old_key {
                        self.detach_key(old_parent, &old_key);
                    }
                }
            }
            self.set_attribute(node, "data-parent-widget", parent_identifier)?;
            self.nodes[node].parent = Some(parent);
        }

        let node = &mut self.nodes[parent];
        let mut displaced = None;
        if let Some(previous) = node.children.get(&key) {
            if previous != &child {
                displaced = previous.as_node();
            }
            if node.render_order.last() != Some(&key) {
                node.children.remove(&key);
            }
        }
        node.render_order.retain(|k| k != &key);
        node.render_order.push(key.clone());
        node.children.set(key, child);

        if let Some(old) = displaced {
            if let Some(old) = self.nodes.get_mut(old) {
                old.parent = None;
            }
        }
        self.flush_changes(parent);
        Ok(())
    }

    /// Key under which `parent` holds `child`, if any.
    pub(crate) fn key_of(&self, parent: NodeId, child: NodeId) -> Option<String> {
        let node = self.nodes.get(parent)?;
        node.render_order
            .iter()
            .find(|k| node.children.get(*k) == Some(&Child::Node(child)))
            .cloned()
    }

    /// Drop `key` from both the children map and render order, clearing the
    /// parent link of a node child.
    fn detach_key(&mut self, parent: NodeId, key: &str) {
        let Some(node) = self.nodes.get_mut(parent) else {
            return;
        };
        node.render_order.retain(|k| k != key);
        let Some(removed) = node.children.remove(key) else {
            return;
        };
        if let Child::Node(child) = removed {
            if let Some(child) = self.nodes.get_mut(child) {
                child.parent = None;
            }
        }
        self.flush_changes(parent);
    }

    /// Remove the first child (in render order) whose identifier matches
    /// `child`'s.
    ///
    /// Returns whether a child was removed. Only the first match goes; a node
    /// mapped under several keys is not a supported configuration.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool> {
        let identifier = self.node(child)?.identifier().to_owned();
        let node = self.node(parent)?;
        let key = node
            .render_order
            .iter()
            .find(|k| match node.children.get(*k) {
                Some(Child::Node(c)) => self
                    .nodes
                    .get(*c)
                    .is_some_and(|n| n.identifier() == identifier),
                _ => false,
            })
            .cloned();

        match key {
            Some(key) => {
                self.detach_key(parent, &key);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every node child. Text children stay.
    pub fn empty(&mut self, id: NodeId) -> Result<()> {
        let node_children: Vec<NodeId> = self
            .node(id)?
            .children
            .values()
            .filter_map(Child::as_node)
            .collect();
        for child in node_children {
            if self.contains(child) {
                self.remove_child(id, child)?;
            }
        }
        Ok(())
    }

    /// Destroy a node and its whole subtree.
    ///
    /// The node is detached from its parent first, and every registry entry
    /// pointing into the subtree is evicted. Returns the removed root's data.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        if let Some(parent) = self.parent(id) {
            if let Some(key) = self.key_of(parent, id) {
                self.detach_key(parent, &key);
            }
        }

        let mut removed = HashSet::new();
        let mut queue = VecDeque::from([id]);
        let mut removed_root = None;
        while let Some(current) = queue.pop_front() {
            let Some(data) = self.nodes.remove(current) else {
                continue;
            };
            for child in data.children.values().filter_map(Child::as_node) {
                // Skip children that were reattached elsewhere.
                if self.nodes.get(child).is_some_and(|c| c.parent == Some(current)) {
                    queue.push_back(child);
                }
            }
            removed.insert(current);
            if current == id {
                removed_root = Some(data);
            }
        }
        self.registry.retain(|_, node| !removed.contains(node));
        removed_root
    }

    // -----------------------------------------------------------------------
    // Attributes, style, classes
    // -----------------------------------------------------------------------

    /// Apply `f` to a node, then notify if any of its maps changed.
    fn mutate<R>(&mut self, id: NodeId, f: impl FnOnce(&mut NodeData) -> R) -> Result<R> {
        let out = f(self.node_mut(id)?);
        self.flush_changes(id);
        Ok(out)
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<bool> {
        let (key, value) = (key.into(), value.into());
        self.mutate(id, |n| n.attributes.set(key, Some(value)))
    }

    /// Set a value-less attribute such as `disabled`.
    pub fn set_bare_attribute(&mut self, id: NodeId, key: impl Into<String>) -> Result<bool> {
        let key = key.into();
        self.mutate(id, |n| n.attributes.set(key, None))
    }

    /// Remove an attribute. Missing keys are a no-op.
    pub fn remove_attribute(&mut self, id: NodeId, key: &str) -> Result<bool> {
        self.mutate(id, |n| n.attributes.remove(key).is_some())
    }

    pub fn set_style(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<bool> {
        let (key, value) = (key.into(), value.into());
        self.mutate(id, |n| n.style.set(key, value))
    }

    pub fn remove_style(&mut self, id: NodeId, key: &str) -> Result<bool> {
        self.mutate(id, |n| n.style.remove(key).is_some())
    }

    /// Bulk style update; at most one notification.
    pub fn update_style<K, V>(
        &mut self,
        id: NodeId,
        items: impl IntoIterator<Item = (K, V)>,
    ) -> Result<bool>
    where
        K: Into<String>,
        V: Into<String>,
    {
        let items: Vec<(String, String)> = items
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.mutate(id, |n| n.style.extend(items))
    }

    /// Add a CSS class. No-op if already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<bool> {
        self.mutate(id, |n| {
            if n.has_class(class) {
                return false;
            }
            n.classes.push(class.to_owned());
            let joined = n.class_attribute();
            n.attributes.set("class".to_owned(), Some(joined))
        })
    }

    /// Remove a CSS class. No-op if not present.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<bool> {
        self.mutate(id, |n| {
            if !n.has_class(class) {
                return false;
            }
            n.classes.retain(|c| c != class);
            let joined = n.class_attribute();
            n.attributes.set("class".to_owned(), Some(joined))
        })
    }

    // -----------------------------------------------------------------------
    // Dirty propagation
    // -----------------------------------------------------------------------

    /// Stop this node from forwarding change notifications to its parent.
    ///
    /// Version bookkeeping continues; only the upward walk is suppressed.
    pub fn disable_refresh(&mut self, id: NodeId) -> Result<()> {
        self.node_mut(id)?.ignore_update = true;
        Ok(())
    }

    pub fn enable_refresh(&mut self, id: NodeId) -> Result<()> {
        self.node_mut(id)?.ignore_update = false;
        Ok(())
    }

    /// Run `f` with refresh disabled on `id`, restoring the previous setting
    /// afterwards.
    pub fn with_refresh_disabled<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut Dom) -> R,
    ) -> Result<R> {
        let previous = std::mem::replace(&mut self.node_mut(id)?.ignore_update, true);
        let out = f(self);
        if let Some(node) = self.nodes.get_mut(id) {
            node.ignore_update = previous;
        }
        Ok(out)
    }

    /// Forward a refresh notification upward without changing anything.
    pub fn request_refresh(&mut self, id: NodeId) -> Result<()> {
        self.node(id)?;
        self.propagate(id);
        Ok(())
    }

    /// Notify for `id` if one of its map hooks fired since the last flush.
    fn flush_changes(&mut self, id: NodeId) {
        if self.nodes.get(id).is_some_and(NodeData::take_changes) {
            self.notify_changed(id);
        }
    }

    /// A node's own maps changed: rebuild its attribute text and tell the
    /// ancestors.
    fn notify_changed(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.refresh_attribute_string();
        self.propagate(id);
    }

    /// Walk parent links until a node with refresh disabled or the root.
    fn propagate(&mut self, from: NodeId) {
        let mut current = from;
        loop {
            let Some(node) = self.nodes.get(current) else {
                break;
            };
            if node.ignore_update {
                break;
            }
            let Some(parent) = node.parent else {
                break;
            };
            let Some(parent_node) = self.nodes.get_mut(parent) else {
                break;
            };
            parent_node.refresh_requests += 1;
            trace!(from = ?current, to = ?parent, "refresh propagated");
            current = parent;
        }
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dom")
            .field("nodes", &self.nodes.len())
            .field("registry", &self.registry.len())
            .field("config", &self.config)
            .finish()
    }
}
