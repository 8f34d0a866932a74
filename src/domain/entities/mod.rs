pub mod account;
pub mod custom_exercise;
pub mod progress_entry;
pub mod read_markers;

pub use account::Account;
pub use custom_exercise::CustomExercise;
pub use progress_entry::{Measurements, ProgressEntry};
pub use read_markers::ReadMarkers;
