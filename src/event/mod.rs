//! Event system: declarations, per-node connectors, invocation.
//!
//! An event is declared once as an [`EventDecl`] (name, parameter list,
//! optional client trigger template, bound method). Each node that carries
//! the event gets its own [`EventConnector`] at construction, holding a single
//! listener slot. Invoking the event runs the bound method, then hands its
//! payload to the listener.

pub mod connector;
pub mod dispatch;
pub mod source;

pub use connector::{Callback, EventConnector, Listener};
pub use source::{forward, EventDecl, EventMethod, EventSource};
