//! Crate-wide error type.

use crate::dom::node::NodeId;

/// Errors surfaced by tree, event and widget operations.
///
/// Every failure is local to the call that produced it; nothing here is
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("node {0:?} does not exist")]
    NodeNotFound(NodeId),
    #[error("no node registered under identifier `{0}`")]
    UnknownIdentifier(String),
    #[error("expected {expected}, found {found}")]
    TypeKind {
        expected: &'static str,
        found: &'static str,
    },
    #[error("node `{node}` has no event `{event}`")]
    UnknownEvent { node: String, event: String },
    #[error("event `{event}` takes {expected} argument(s), {found} given")]
    ArgumentMismatch {
        event: String,
        expected: usize,
        found: usize,
    },
    #[error("adding `{child}` under `{parent}` would create a cycle")]
    Cycle { parent: String, child: String },
    #[error("malformed style declaration: {0}")]
    InvalidStyle(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_argument_mismatch() {
        let err = Error::ArgumentMismatch {
            event: "onmousedown".into(),
            expected: 2,
            found: 0,
        };
        assert_eq!(
            err.to_string(),
            "event `onmousedown` takes 2 argument(s), 0 given"
        );
    }

    #[test]
    fn display_type_kind() {
        let err = Error::TypeKind {
            expected: "widget",
            found: "text",
        };
        assert_eq!(err.to_string(), "expected widget, found text");
    }
}
