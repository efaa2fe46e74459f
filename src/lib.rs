pub mod config;
pub mod display;
pub mod error;
pub mod storage;
pub mod timetable;
pub mod web;

pub use error::{PlannerError, Result};
