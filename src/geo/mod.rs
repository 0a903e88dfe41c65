mod ellipsoid;
mod enu;

pub use ellipsoid::{Cartesian3, Cartographic};
pub use enu::heading_pitch;
