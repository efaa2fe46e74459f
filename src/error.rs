use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unknown slot code: {0}")]
    UnknownSlot(String),

    #[error("LUNCH cannot be assigned")]
    LunchSlot,

    #[error("No slots selected")]
    NoSlots,

    #[error("Faculty names must not be blank")]
    BlankFaculty,
}

pub type Result<T> = std::result::Result<T, PlannerError>;
