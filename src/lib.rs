//! Crate entrypoint wiring together configuration, the zone store client,
//! the reconciliation core, and the webhook API.

pub mod api;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod reconcile;
pub mod translate;
pub mod validation;
pub mod zone;

use config::AppConfig;
use reconcile::Reconciler;

use std::sync::Arc;

/// Complete application dependencies shared across handlers.
pub struct AppState {
    pub config: AppConfig,
    pub reconciler: Reconciler,
}

/// Arc-wrapped version of `AppState` passed into Axum extensions.
pub type SharedState = Arc<AppState>;
