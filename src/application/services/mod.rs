pub mod exercise_service;
pub mod progress_service;
pub mod read_marker_service;
pub mod sync_service;

pub use exercise_service::ExerciseService;
pub use progress_service::ProgressService;
pub use read_marker_service::ReadMarkerService;
pub use sync_service::{SyncService, SyncStatus};
