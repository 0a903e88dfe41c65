mod error;
mod sequence;
mod service;
mod time;
mod types;

pub use error::TrackError;
pub use sequence::FetchSequence;
pub use service::{TrackDataService, TrackSource};
pub use time::parse_instant;
pub use types::{TimeWindow, Track, TrackPoint, ViewerExtent};

#[cfg(test)]
pub(crate) use types::fixtures;
