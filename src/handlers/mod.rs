//! HTTP handlers for poem CRUD and translation.

pub mod poem;
pub use poem::*;
