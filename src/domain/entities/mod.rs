//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A stored short code → original URL mapping with its click counter
//! - [`NewLink`] - Input for inserting a new mapping

pub mod link;

pub use link::{Link, NewLink};
