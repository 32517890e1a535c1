use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request to showtimes API failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("showtimes API returned invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no movie found for slug `{0}`")]
    MovieNotFound(String),

    #[error("UTC offset of {0} hours is out of range")]
    InvalidOffset(i32),

    #[error("cannot read `{0}` as a dd/MM/yyyy hh:mm AM/PM timestamp")]
    InvalidNow(String),
}

/// Why a single showtime was left out of the schedule.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimingError {
    #[error("malformed timestamp `{raw}`: {source}")]
    Malformed {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unknown booking status `{status}` for `{raw}`")]
    UnknownStatus { raw: String, status: String },
}

/// A wire string that names none of an enum's variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// A record dropped while validating an API payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectedRecord {
    #[error("cinema `{cinema}`: {error}")]
    Timing { cinema: String, error: TimingError },

    #[error("cinema `{cinema}` has unknown theatre chain `{theatre}`")]
    UnknownTheatre { cinema: String, theatre: String },
}
