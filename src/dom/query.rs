//! DOM queries: by class, tag, predicate; child lookup; subtree walk.

use super::node::{Child, NodeData, NodeId};
use super::tree::Dom;

impl Dom {
    /// Find all nodes that have the given CSS class.
    pub fn query_by_class(&self, class: &str) -> Vec<NodeId> {
        self.iter_nodes()
            .filter(|(_, data)| data.has_class(class))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// Find all nodes with the given tag name.
    pub fn query_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.iter_nodes()
            .filter(|(_, data)| data.tag() == tag)
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// Find all nodes matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&NodeData) -> bool) -> Vec<NodeId> {
        self.iter_nodes()
            .filter(|(_, data)| predicate(data))
            .map(|(node_id, _)| node_id)
            .collect()
    }

    /// The child stored under `key`, if any.
    pub fn get_child(&self, parent: NodeId, key: &str) -> Option<&Child> {
        self.nodes.get(parent)?.children.get(key)
    }

    /// Node children of `parent` in render order. Text children are skipped.
    pub fn child_nodes(&self, parent: NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(parent) else {
            return Vec::new();
        };
        node.render_order
            .iter()
            .filter_map(|key| node.children.get(key).and_then(Child::as_node))
            .collect()
    }

    /// Pre-order walk of the subtree under `root`, following render order.
    ///
    /// `root` comes first. Iterative, so deep trees do not grow the stack.
    pub fn walk_depth_first(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.nodes.contains_key(root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            out.push(current);
            let children = self.child_nodes(current);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    /// Iterate over all `(NodeId, &NodeData)` pairs in the arena.
    ///
    /// Slotmap order: deterministic, but not tree order.
    fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::node::{Child, Element, NodeId};
    use crate::dom::tree::Dom;

    /// Build a test tree for queries:
    /// ```text
    ///       root (div #root)
    ///      /    \
    ///    a       b
    ///  (nav      (main
    ///   #sidebar  #content
    ///   .nav)     .content)
    ///   / \
    ///  c   d
    /// (button  (button
    ///  #save    #cancel
    ///  .primary .danger
    ///  .btn)    .btn)
    /// ```
    fn build_query_tree() -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let root = dom.insert(Element::tag("div").with_identifier("root"));
        let a = dom.insert(Element::tag("nav").with_identifier("sidebar").with_class("nav"));
        let b = dom.insert(
            Element::tag("main")
                .with_identifier("content")
                .with_class("content"),
        );
        let c = dom.insert(
            Element::tag("button")
                .with_identifier("save")
                .with_classes(["primary", "btn"]),
        );
        let d = dom.insert(
            Element::tag("button")
                .with_identifier("cancel")
                .with_classes(["danger", "btn"]),
        );
        dom.add_child(root, "a", a).unwrap();
        dom.add_child(root, "b", b).unwrap();
        dom.add_child(a, "c", c).unwrap();
        dom.add_child(a, "label", "Actions").unwrap();
        dom.add_child(a, "d", d).unwrap();
        (dom, root)
    }

    fn identifiers(dom: &Dom, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|id| dom.identifier(*id).unwrap().to_owned())
            .collect()
    }

    #[test]
    fn query_by_class_single() {
        let (dom, _) = build_query_tree();
        let navs = dom.query_by_class("nav");
        assert_eq!(identifiers(&dom, &navs), vec!["sidebar"]);
    }

    #[test]
    fn query_by_class_multiple() {
        let (dom, _) = build_query_tree();
        assert_eq!(dom.query_by_class("btn").len(), 2);
        assert!(dom.query_by_class("nonexistent").is_empty());
    }

    #[test]
    fn query_by_tag() {
        let (dom, _) = build_query_tree();
        assert_eq!(dom.query_by_tag("button").len(), 2);
        assert_eq!(dom.query_by_tag("div").len(), 1);
        assert!(dom.query_by_tag("table").is_empty());
    }

    #[test]
    fn query_all_custom_predicate() {
        let (dom, _) = build_query_tree();
        let results = dom.query_all(|data| data.identifier().starts_with('s'));
        // "sidebar" and "save"
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn get_child_by_key() {
        let (dom, root) = build_query_tree();
        let a = dom.resolve("sidebar").unwrap();
        assert_eq!(dom.get_child(root, "a"), Some(&Child::Node(a)));
        assert_eq!(
            dom.get_child(a, "label").and_then(Child::as_text),
            Some("Actions")
        );
        assert!(dom.get_child(root, "missing").is_none());
    }

    #[test]
    fn walk_follows_render_order() {
        let (mut dom, root) = build_query_tree();
        let order = dom.walk_depth_first(root);
        assert_eq!(
            identifiers(&dom, &order),
            vec!["root", "sidebar", "save", "cancel", "content"]
        );

        let a = dom.resolve("sidebar").unwrap();
        dom.add_child(root, "a", a).unwrap();
        let order = dom.walk_depth_first(root);
        assert_eq!(
            identifiers(&dom, &order),
            vec!["root", "content", "sidebar", "save", "cancel"]
        );
    }

    #[test]
    fn query_on_empty_dom() {
        let dom = Dom::new();
        assert!(dom.query_by_class("x").is_empty());
        assert!(dom.query_by_tag("x").is_empty());
        assert!(dom.query_all(|_| true).is_empty());
    }
}
