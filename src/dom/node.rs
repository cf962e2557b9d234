//! Node types: NodeId, Child, Element, NodeData.

use std::cell::Cell;
use std::rc::Rc;

use slotmap::new_key_type;

use crate::event::source::EventSource;
use crate::versioned::VersionedMap;
use crate::widget::layout::{LayoutOrientation, Length};

new_key_type! {
    /// Arena key of a node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// A child slot value: either another node or raw markup text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child {
    Node(NodeId),
    Text(String),
}

impl Child {
    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(*id),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            Self::Node(_) => None,
        }
    }
}

impl From<NodeId> for Child {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Widget-only state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetState {
    pub layout: LayoutOrientation,
}

// ---------------------------------------------------------------------------
// Element (builder)
// ---------------------------------------------------------------------------

/// Description of a node to insert into a [`Dom`](super::tree::Dom).
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) tag: String,
    pub(crate) identifier: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: Vec<(String, Option<String>)>,
    pub(crate) widget: bool,
    pub(crate) layout: Option<LayoutOrientation>,
    pub(crate) width: Option<Length>,
    pub(crate) height: Option<Length>,
    pub(crate) style: Vec<(String, String)>,
}

impl Element {
    /// A plain tag: attributes, style and children, no events.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            identifier: None,
            classes: Vec::new(),
            attributes: Vec::new(),
            widget: false,
            layout: None,
            width: None,
            height: None,
            style: Vec::new(),
        }
    }

    /// A widget rendered as `<div>`, with the standard event set installed.
    pub fn widget() -> Self {
        Self::widget_tag("div")
    }

    /// A widget rendered with a custom tag name.
    pub fn widget_tag(tag: impl Into<String>) -> Self {
        Self {
            widget: true,
            ..Self::tag(tag)
        }
    }

    /// Fix the identifier instead of deriving one from the arena key.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Add a CSS class (builder). Duplicates are ignored.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Add multiple CSS classes (builder).
    pub fn with_classes(mut self, classes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for class in classes {
            self = self.with_class(class);
        }
        self
    }

    /// Initial attribute. `None` renders as a bare attribute name.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Option<&str>) -> Self {
        self.attributes.push((key.into(), value.map(str::to_owned)));
        self
    }

    pub fn with_layout(mut self, layout: LayoutOrientation) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_size(mut self, width: impl Into<Length>, height: impl Into<Length>) -> Self {
        self.width = Some(width.into());
        self.height = Some(height.into());
        self
    }

    /// Initial style property.
    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.push((key.into(), value.into()));
        self
    }

    pub fn is_widget(&self) -> bool {
        self.widget
    }
}

// ---------------------------------------------------------------------------
// NodeData
// ---------------------------------------------------------------------------

/// Runtime state of one node in the arena.
#[derive(Debug)]
pub struct NodeData {
    pub(crate) tag: String,
    pub(crate) classes: Vec<String>,
    pub(crate) children: VersionedMap<String, Child>,
    pub(crate) attributes: VersionedMap<String, Option<String>>,
    pub(crate) style: VersionedMap<String, String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) render_order: Vec<String>,
    pub(crate) cached_markup: String,
    pub(crate) attribute_string: String,
    pub(crate) ignore_update: bool,
    pub(crate) refresh_requests: u64,
    pub(crate) events: EventSource,
    pub(crate) widget: Option<WidgetState>,
    /// Raised by the change hooks of the three maps.
    pending: Rc<Cell<bool>>,
}

/// Change hook that raises `flag`.
fn raise(flag: &Rc<Cell<bool>>) -> impl FnMut(u64) + 'static {
    let flag = Rc::clone(flag);
    move |_| flag.set(true)
}

impl NodeData {
    pub(crate) fn new(tag: String, widget: Option<WidgetState>) -> Self {
        let pending = Rc::new(Cell::new(false));
        let mut children = VersionedMap::new();
        children.on_change_hook(raise(&pending));
        let mut attributes = VersionedMap::new();
        attributes.on_change_hook(raise(&pending));
        let mut style = VersionedMap::new();
        style.on_change_hook(raise(&pending));
        Self {
            tag,
            classes: Vec::new(),
            children,
            attributes,
            style,
            parent: None,
            render_order: Vec::new(),
            cached_markup: String::new(),
            attribute_string: String::new(),
            ignore_update: false,
            refresh_requests: 0,
            events: EventSource::new(),
            widget,
            pending,
        }
    }

    /// Whether any of the maps changed since the last call, clearing the
    /// flag.
    pub(crate) fn take_changes(&self) -> bool {
        self.pending.replace(false)
    }

    /// The identifier, read from the `id` attribute.
    pub fn identifier(&self) -> &str {
        self.attributes
            .get("id")
            .and_then(|v| v.as_deref())
            .unwrap_or_default()
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn children(&self) -> &VersionedMap<String, Child> {
        &self.children
    }

    pub fn attributes(&self) -> &VersionedMap<String, Option<String>> {
        &self.attributes
    }

    pub fn style(&self) -> &VersionedMap<String, String> {
        &self.style
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child keys in serialization order.
    pub fn render_order(&self) -> &[String] {
        &self.render_order
    }

    /// Markup captured by the last render pass.
    pub fn cached_markup(&self) -> &str {
        &self.cached_markup
    }

    /// Flattened `k="v"` attribute text, style included.
    pub fn attribute_string(&self) -> &str {
        &self.attribute_string
    }

    /// Refresh notifications received from descendants so far.
    pub fn refresh_requests(&self) -> u64 {
        self.refresh_requests
    }

    pub fn is_refresh_enabled(&self) -> bool {
        !self.ignore_update
    }

    pub fn is_widget(&self) -> bool {
        self.widget.is_some()
    }

    pub fn layout(&self) -> Option<LayoutOrientation> {
        self.widget.map(|w| w.layout)
    }

    pub fn events(&self) -> &EventSource {
        &self.events
    }

    /// Whether children, attributes or style changed since the last capture.
    pub fn is_dirty(&self) -> bool {
        self.children.changed() || self.attributes.changed() || self.style.changed()
    }

    pub(crate) fn mark_seen(&mut self) {
        self.children.mark_seen();
        self.attributes.mark_seen();
        self.style.mark_seen();
    }

    pub(crate) fn class_attribute(&self) -> String {
        self.classes.join(" ")
    }

    /// Rebuild [`attribute_string`](Self::attribute_string).
    ///
    /// A `style` attribute is replaced in place by the serialized style map;
    /// without one, the style goes last.
    pub(crate) fn refresh_attribute_string(&mut self) {
        let style = self
            .style
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(";");

        let mut parts = Vec::with_capacity(self.attributes.len() + 1);
        let mut style_placed = false;
        for (key, value) in self.attributes.iter() {
            if key == "style" {
                parts.push(format!("style=\"{style}\""));
                style_placed = true;
                continue;
            }
            match value {
                Some(v) => parts.push(format!("{key}=\"{v}\"")),
                None => parts.push(key.clone()),
            }
        }
        if !style_placed {
            parts.push(format!("style=\"{style}\""));
        }
        self.attribute_string = parts.join(" ");
    }

    /// Serialize this node around already-rendered inner markup.
    pub(crate) fn wrap(&self, inner: &str) -> String {
        format!(
            "<{tag} {attrs}>{inner}</{tag}>",
            tag = self.tag,
            attrs = self.attribute_string
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> NodeData {
        NodeData::new("div".into(), None)
    }

    #[test]
    fn element_defaults() {
        let e = Element::tag("span");
        assert_eq!(e.tag, "span");
        assert!(e.identifier.is_none());
        assert!(e.classes.is_empty());
        assert!(!e.is_widget());
    }

    #[test]
    fn element_widget_is_div() {
        let e = Element::widget();
        assert_eq!(e.tag, "div");
        assert!(e.is_widget());
    }

    #[test]
    fn element_class_dedup() {
        let e = Element::tag("p").with_class("a").with_classes(["a", "b"]);
        assert_eq!(e.classes, vec!["a", "b"]);
    }

    #[test]
    fn new_node_is_clean() {
        let n = node();
        assert!(!n.is_dirty());
        assert!(n.parent().is_none());
        assert!(n.is_refresh_enabled());
        assert_eq!(n.identifier(), "");
    }

    #[test]
    fn any_map_makes_dirty() {
        let mut n = node();
        n.style.set("color".into(), "red".into());
        assert!(n.is_dirty());
        n.mark_seen();
        assert!(!n.is_dirty());
        n.children.set("t".into(), Child::from("hi"));
        assert!(n.is_dirty());
    }

    #[test]
    fn attribute_string_appends_style() {
        let mut n = node();
        n.attributes.set("id".into(), Some("x".into()));
        n.attributes.set("hidden".into(), None);
        n.style.set("width".into(), "10px".into());
        n.style.set("float".into(), "left".into());
        n.refresh_attribute_string();
        assert_eq!(
            n.attribute_string(),
            "id=\"x\" hidden style=\"width:10px;float:left\""
        );
    }

    #[test]
    fn attribute_string_style_in_place() {
        let mut n = node();
        n.attributes.set("style".into(), Some("ignored".into()));
        n.attributes.set("id".into(), Some("x".into()));
        n.refresh_attribute_string();
        assert_eq!(n.attribute_string(), "style=\"\" id=\"x\"");
    }

    #[test]
    fn wrap_markup() {
        let mut n = node();
        n.attributes.set("id".into(), Some("n".into()));
        n.refresh_attribute_string();
        assert_eq!(n.wrap("inner"), "<div id=\"n\" style=\"\">inner</div>");
    }

    #[test]
    fn child_accessors() {
        let text = Child::from("hello");
        assert_eq!(text.as_text(), Some("hello"));
        assert!(text.as_node().is_none());
    }

    #[test]
    fn node_id_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<NodeId>();
    }
}
