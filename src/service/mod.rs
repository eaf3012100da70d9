//! Access and application layers over the poem store.

mod access;
mod poem;
mod validation;
pub use access::PoemAccess;
pub use poem::PoemService;
pub use validation::PoemValidator;
