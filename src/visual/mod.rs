mod builder;
mod marker;
mod moving;
mod orientation;
mod path;
mod sampled;
mod style;

pub use builder::{build_visualization, TrackVisualization};
pub use moving::MODEL_ALTITUDE_M;
pub use sampled::seconds_between;
pub use style::Color;
