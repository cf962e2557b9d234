//! Tree-wide settings applied when nodes are created and appended.

use crate::widget::layout::LayoutOrientation;

/// Configuration for a [`Dom`](crate::dom::Dom).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Prepended to identifiers generated from arena keys.
    pub identifier_prefix: Option<String>,
    /// `margin` style given to every new widget. `None` leaves it unset.
    pub default_margin: Option<String>,
    /// Orientation of widgets built without an explicit layout.
    pub default_layout: LayoutOrientation,
    /// Float children appended to a horizontal widget to the left.
    pub float_horizontal_children: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            identifier_prefix: None,
            default_margin: Some("0px".to_owned()),
            default_layout: LayoutOrientation::Vertical,
            float_horizontal_children: true,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated identifier prefix (builder).
    pub fn with_identifier_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.identifier_prefix = Some(prefix.into());
        self
    }

    pub fn with_default_margin(mut self, margin: impl Into<String>) -> Self {
        self.default_margin = Some(margin.into());
        self
    }

    pub fn without_default_margin(mut self) -> Self {
        self.default_margin = None;
        self
    }

    pub fn with_default_layout(mut self, layout: LayoutOrientation) -> Self {
        self.default_layout = layout;
        self
    }

    pub fn with_horizontal_float(mut self, enabled: bool) -> Self {
        self.float_horizontal_children = enabled;
        self
    }
}
