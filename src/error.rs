use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwuError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch {set}/{number}: Status {status}")]
    Status {
        set: String,
        number: u32,
        status: u16,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Prompt error: {0}")]
    Prompt(String),
}

impl From<inquire::InquireError> for SwuError {
    fn from(err: inquire::InquireError) -> Self {
        SwuError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SwuError>;

/// Prompt errors after which a menu loop must stop instead of asking again:
/// no terminal to read from, or the user pressed Esc / Ctrl-C.
pub fn ends_menu(err: &inquire::InquireError) -> bool {
    matches!(
        err,
        inquire::InquireError::NotTTY
            | inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted
    )
}
