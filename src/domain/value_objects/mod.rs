pub mod exercise_id;
pub mod photo_slot;
pub mod slot;

pub use exercise_id::ExerciseId;
pub use photo_slot::{PhotoSlot, PhotoSlots};
pub use slot::SlotPosition;
