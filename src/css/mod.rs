//! CSS helpers.

pub mod inline;

pub use inline::parse_declarations;
