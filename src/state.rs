//! Shared application state for all routes.

use crate::service::PoemService;

#[derive(Clone)]
pub struct AppState {
    pub poems: PoemService,
}
