use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("No Data")]
    InsufficientData { vessel_id: String, count: usize },
}

impl From<reqwest::Error> for TrackError {
    fn from(err: reqwest::Error) -> Self {
        TrackError::Transport(err.to_string())
    }
}
