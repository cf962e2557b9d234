//! Widget layer: the standard event set, layout helpers, text content.
//!
//! A widget is a node built with [`Element::widget`](crate::dom::Element::widget).
//! The operations here live on [`Dom`](crate::dom::Dom) and reject plain tags
//! where a widget is required.

pub mod events;
pub mod layout;
pub mod text;

pub use events::STANDARD_EVENTS;
pub use layout::{LayoutOrientation, Length};
