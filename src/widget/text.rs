//! Textual content stored under the `"text"` child key.

use crate::dom::node::NodeId;
use crate::dom::tree::Dom;
use crate::error::Result;

const TEXT_KEY: &str = "text";

impl Dom {
    /// Replace the node's text content.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<()> {
        self.add_child(id, TEXT_KEY, text.into())
    }

    /// The node's text content, empty if none was set.
    pub fn text(&self, id: NodeId) -> Result<&str> {
        Ok(self
            .node(id)?
            .children
            .get(TEXT_KEY)
            .and_then(|c| c.as_text())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::Element;

    #[test]
    fn text_round_trip() {
        let mut dom = Dom::new();
        let label = dom.insert(Element::widget_tag("p"));
        assert_eq!(dom.text(label).unwrap(), "");
        dom.set_text(label, "hello").unwrap();
        assert_eq!(dom.text(label).unwrap(), "hello");
    }

    #[test]
    fn same_text_is_not_a_change() {
        let mut dom = Dom::new();
        let label = dom.insert(Element::widget_tag("p"));
        dom.set_text(label, "hi").unwrap();
        let version = dom.get(label).unwrap().children().version();
        dom.set_text(label, "hi").unwrap();
        assert_eq!(dom.get(label).unwrap().children().version(), version);
    }
}
