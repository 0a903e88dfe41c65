mod camera;
mod clock;
mod scene;
mod sync;

pub use camera::Camera;
pub use clock::{Clock, ClockRange, ClockStep};
pub use scene::{SceneViewer, Viewer};
pub use sync::{SyncSettings, ViewerHandle, ViewerSynchronizer};
