//! Offline-first synchronization core for the FormTrack fitness app.
//!
//! Local mutations mark records unsynced or tombstoned; a sync pass then
//! reconciles them against the remote system of record with last-write-wins
//! conflict resolution, per-item retry and a per-slot photo lifecycle.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod state;

pub use shared::error::{AppError, Result};
pub use state::AppState;

/// Install the tracing subscriber for host applications that have none.
pub fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formtrack=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
