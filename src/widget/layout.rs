//! Widget layout helpers: size, orientation, `append`, enabled state.

use tracing::trace;

use crate::css::inline::parse_declarations;
use crate::dom::node::{Child, NodeId};
use crate::dom::tree::{ChildValue, Dom};
use crate::error::{Error, Result};

/// How a widget arranges appended children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutOrientation {
    Horizontal,
    #[default]
    Vertical,
}

/// A CSS length for `width`/`height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Length {
    /// Whole pixels, serialized as `"{n}px"`.
    Px(i64),
    /// Any other CSS length (`"50%"`, `"auto"`), used verbatim.
    Raw(String),
}

impl Length {
    pub fn to_css(&self) -> String {
        match self {
            Self::Px(n) => format!("{n}px"),
            Self::Raw(s) => s.clone(),
        }
    }
}

impl From<i64> for Length {
    fn from(n: i64) -> Self {
        Self::Px(n)
    }
}

impl From<i32> for Length {
    fn from(n: i32) -> Self {
        Self::Px(n.into())
    }
}

/// Integer strings become pixels; anything else is kept as written.
impl From<&str> for Length {
    fn from(s: &str) -> Self {
        match s.trim().parse::<i64>() {
            Ok(n) => Self::Px(n),
            Err(_) => Self::Raw(s.to_owned()),
        }
    }
}

impl From<String> for Length {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl Dom {
    fn require_widget(&self, id: NodeId) -> Result<()> {
        if self.node(id)?.is_widget() {
            Ok(())
        } else {
            Err(Error::TypeKind {
                expected: "widget",
                found: "tag",
            })
        }
    }

    /// Set both `width` and `height`, notifying at most once.
    pub fn set_size(
        &mut self,
        id: NodeId,
        width: impl Into<Length>,
        height: impl Into<Length>,
    ) -> Result<bool> {
        self.require_widget(id)?;
        self.update_style(
            id,
            [
                ("width", width.into().to_css()),
                ("height", height.into().to_css()),
            ],
        )
    }

    pub fn set_width(&mut self, id: NodeId, width: impl Into<Length>) -> Result<bool> {
        self.require_widget(id)?;
        self.set_style(id, "width", width.into().to_css())
    }

    pub fn set_height(&mut self, id: NodeId, height: impl Into<Length>) -> Result<bool> {
        self.require_widget(id)?;
        self.set_style(id, "height", height.into().to_css())
    }

    /// Change how later [`append`](Self::append) calls lay out children.
    ///
    /// Children already appended keep their style.
    pub fn set_layout_orientation(
        &mut self,
        id: NodeId,
        layout: LayoutOrientation,
    ) -> Result<()> {
        self.require_widget(id)?;
        if let Some(widget) = self.node_mut(id)?.widget.as_mut() {
            widget.layout = layout;
        }
        Ok(())
    }

    /// Add widget children, applying the parent's layout convention.
    ///
    /// An empty `key` means "use the child's identifier". A list appends each
    /// element under its own identifier; a keyed collection uses its keys.
    /// Returns the keys used, in order. Text values and plain tags are
    /// rejected.
    pub fn append(
        &mut self,
        parent: NodeId,
        value: impl Into<ChildValue>,
        key: &str,
    ) -> Result<Vec<String>> {
        self.require_widget(parent)?;
        let mut keys = Vec::new();
        self.append_value(parent, value.into(), key, &mut keys)?;
        Ok(keys)
    }

    fn append_value(
        &mut self,
        parent: NodeId,
        value: ChildValue,
        key: &str,
        keys: &mut Vec<String>,
    ) -> Result<()> {
        match value {
            ChildValue::Single(Child::Node(child)) => {
                keys.push(self.append_widget(parent, child, key)?);
                Ok(())
            }
            ChildValue::Single(Child::Text(_)) => Err(Error::TypeKind {
                expected: "widget",
                found: "text",
            }),
            ChildValue::List(items) => {
                for item in items {
                    self.append_value(parent, item, "", keys)?;
                }
                Ok(())
            }
            ChildValue::Keyed(items) => {
                for (k, item) in items {
                    self.append_value(parent, item, &k, keys)?;
                }
                Ok(())
            }
        }
    }

    fn append_widget(&mut self, parent: NodeId, child: NodeId, key: &str) -> Result<String> {
        self.require_widget(child)?;
        let key = if key.is_empty() {
            self.node(child)?.identifier().to_owned()
        } else {
            key.to_owned()
        };
        self.add_child(parent, key.clone(), child)?;

        let horizontal = self.node(parent)?.layout() == Some(LayoutOrientation::Horizontal);
        if horizontal && self.config().float_horizontal_children {
            let floats_none = self
                .node(child)?
                .style
                .get("float")
                .is_some_and(|f| f == "none");
            if !floats_none {
                self.set_style(child, "float", "left")?;
                trace!(%key, "floated appended child");
            }
        }
        Ok(key)
    }

    /// Enable or disable a widget through the bare `disabled` attribute.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> Result<bool> {
        if enabled {
            self.remove_attribute(id, "disabled")
        } else {
            self.set_bare_attribute(id, "disabled")
        }
    }

    pub fn is_enabled(&self, id: NodeId) -> Result<bool> {
        Ok(!self.node(id)?.attributes.contains_key("disabled"))
    }

    /// Merge `name: value; ...` declarations into the style map.
    ///
    /// Nothing is applied when the text fails to parse.
    pub fn set_inline_style(&mut self, id: NodeId, declarations: &str) -> Result<bool> {
        self.node(id)?;
        let pairs = parse_declarations(declarations)?;
        self.update_style(id, pairs)
    }
}
