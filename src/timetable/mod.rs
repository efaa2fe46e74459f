pub mod types;
pub mod slots;
pub mod store;
pub mod views;

pub use types::{Assignment, FacultyUpdate, SlotRef};
pub use slots::{locate, is_lunch, LUNCH};
pub use store::{AssignmentStore, STORAGE_KEY};
