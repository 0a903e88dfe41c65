//! Keeps a viewer's clock, timeline, camera and light in step with the
//! loaded track.
//!
//! The viewer may not exist yet when the first track arrives, so the
//! synchronizer holds an optional handle. Until [`ViewerSynchronizer::bind_viewer`]
//! is called every operation is silently skipped.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::geo::Cartographic;
use crate::track::ViewerExtent;
use crate::visual::Color;

use super::clock::{ClockRange, ClockStep};
use super::scene::{DirectionalLight, Viewer};

pub const PLAYBACK_MULTIPLIER: f64 = 25_000.0;
pub const CAMERA_ALTITUDE_M: f64 = 250_000.0;
pub const FLIGHT_DURATION: Duration = Duration::from_secs(3);

pub type ViewerHandle<V> = Arc<Mutex<V>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncSettings {
    pub multiplier: f64,
    pub clock_range: ClockRange,
    pub clock_step: ClockStep,
    pub camera_altitude_m: f64,
    pub flight_duration: Duration,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            multiplier: PLAYBACK_MULTIPLIER,
            clock_range: ClockRange::LoopStop,
            clock_step: ClockStep::SystemClockMultiplier,
            camera_altitude_m: CAMERA_ALTITUDE_M,
            flight_duration: FLIGHT_DURATION,
        }
    }
}

pub struct ViewerSynchronizer<V> {
    viewer: Option<ViewerHandle<V>>,
    settings: SyncSettings,
}

impl<V: Viewer> ViewerSynchronizer<V> {
    pub fn new(settings: SyncSettings) -> Self {
        Self {
            viewer: None,
            settings,
        }
    }

    /// Replaces any previously bound viewer.
    pub fn bind_viewer(&mut self, handle: ViewerHandle<V>) {
        if self.viewer.is_some() {
            log::debug!("rebinding viewer");
        }
        self.viewer = Some(handle);
    }

    fn with_viewer<R>(&self, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        let handle = self.viewer.as_ref()?;
        let mut viewer = handle.lock().unwrap_or_else(PoisonError::into_inner);
        Some(f(&mut viewer))
    }

    pub fn sync_timeline(&self, start: DateTime<Utc>, end: DateTime<Utc>) {
        let SyncSettings {
            multiplier,
            clock_range,
            clock_step,
            ..
        } = self.settings;
        let applied = self.with_viewer(|viewer| {
            viewer.timeline_mut().zoom_to(start, end);

            let clock = viewer.clock_mut();
            clock.start = start;
            clock.stop = end;
            clock.current = start;
            clock.multiplier = multiplier;
            clock.range = clock_range;
            clock.step = clock_step;
            clock.should_animate = true;
        });
        if applied.is_none() {
            log::debug!("no viewer bound, skipping timeline sync");
        }
    }

    pub fn fly_to_point(&self, longitude: f64, latitude: f64) {
        let destination =
            Cartographic::from_degrees(longitude, latitude, self.settings.camera_altitude_m);
        let duration = self.settings.flight_duration;
        self.with_viewer(|viewer| viewer.camera_mut().fly_to(destination, duration));
    }

    /// Point a white directional light along the camera's current forward
    /// vector. Later camera moves do not update it.
    pub fn apply_directional_lighting(&self) {
        self.with_viewer(|viewer| {
            let direction = viewer.camera().direction();
            viewer.set_light(DirectionalLight {
                color: Color::WHITE,
                direction,
            });
        });
    }

    /// Timeline, camera and light for a freshly loaded track, in that order.
    pub fn sync_extent(&self, extent: &ViewerExtent) {
        self.sync_timeline(extent.start, extent.stop);
        self.fly_to_point(extent.anchor_longitude, extent.anchor_latitude);
        self.apply_directional_lighting();
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::viewer::SceneViewer;

    fn t(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, hour, 0, 0).unwrap()
    }

    fn bound() -> (ViewerSynchronizer<SceneViewer>, ViewerHandle<SceneViewer>) {
        let handle = Arc::new(Mutex::new(SceneViewer::new(t(12))));
        let mut sync = ViewerSynchronizer::new(SyncSettings::default());
        sync.bind_viewer(handle.clone());
        (sync, handle)
    }

    #[test]
    fn unbound_operations_are_no_ops() {
        let sync: ViewerSynchronizer<SceneViewer> = ViewerSynchronizer::new(SyncSettings::default());
        sync.sync_timeline(t(0), t(1));
        sync.fly_to_point(10.0, 50.0);
        sync.apply_directional_lighting();
    }

    #[test]
    fn timeline_sync_configures_clock() {
        let (sync, handle) = bound();
        sync.sync_timeline(t(0), t(5));

        let viewer = handle.lock().unwrap();
        let clock = viewer.clock();
        assert_eq!(clock.start, t(0));
        assert_eq!(clock.stop, t(5));
        assert_eq!(clock.current, t(0));
        assert_eq!(clock.multiplier, PLAYBACK_MULTIPLIER);
        assert_eq!(clock.range, ClockRange::LoopStop);
        assert_eq!(clock.step, ClockStep::SystemClockMultiplier);
        assert!(clock.should_animate);
        assert_eq!(viewer.timeline().visible(), Some((t(0), t(5))));
    }

    #[test]
    fn clock_modes_come_from_settings() {
        let handle = Arc::new(Mutex::new(SceneViewer::new(t(12))));
        let mut sync = ViewerSynchronizer::new(SyncSettings {
            multiplier: 600.0,
            clock_range: ClockRange::Clamped,
            clock_step: ClockStep::TickDependent,
            ..SyncSettings::default()
        });
        sync.bind_viewer(handle.clone());
        sync.sync_timeline(t(0), t(1));

        let mut viewer = handle.lock().unwrap();
        assert_eq!(viewer.clock().range, ClockRange::Clamped);
        assert_eq!(viewer.clock().step, ClockStep::TickDependent);

        // 600 s per tick: the sixth tick lands on stop, the seventh halts.
        for _ in 0..7 {
            viewer.advance(Duration::from_millis(1));
        }
        assert_eq!(viewer.clock().current, t(1));
        assert!(!viewer.clock().should_animate);
    }

    #[test]
    fn fly_to_point_is_smoothed() {
        let (sync, handle) = bound();
        sync.fly_to_point(10.0, 50.0);

        let mut viewer = handle.lock().unwrap();
        assert!(viewer.camera().is_flying());
        assert_eq!(
            viewer.camera().destination(),
            Some(Cartographic::from_degrees(10.0, 50.0, CAMERA_ALTITUDE_M))
        );

        viewer.advance(FLIGHT_DURATION);
        assert!(!viewer.camera().is_flying());
        assert_eq!(viewer.camera().location().height_m, CAMERA_ALTITUDE_M);
    }

    #[test]
    fn lighting_is_a_snapshot() {
        let (sync, handle) = bound();
        sync.apply_directional_lighting();
        let before = handle.lock().unwrap().camera().direction();
        assert_eq!(handle.lock().unwrap().light().unwrap().direction, before);

        sync.fly_to_point(120.0, -30.0);
        handle.lock().unwrap().advance(Duration::from_secs(10));

        let viewer = handle.lock().unwrap();
        assert_ne!(viewer.camera().direction(), before);
        assert_eq!(viewer.light().unwrap().direction, before);
        assert_eq!(viewer.light().unwrap().color, Color::WHITE);
    }

    #[test]
    fn rebinding_replaces_the_viewer() {
        let (mut sync, first) = bound();
        let second = Arc::new(Mutex::new(SceneViewer::new(t(12))));
        sync.bind_viewer(second.clone());

        sync.sync_timeline(t(0), t(1));
        assert_eq!(second.lock().unwrap().clock().stop, t(1));
        assert_ne!(first.lock().unwrap().clock().stop, t(1));
    }

    #[test]
    fn sync_extent_frames_the_track() {
        let (sync, handle) = bound();
        sync.sync_extent(&ViewerExtent {
            start: t(0),
            stop: t(3),
            anchor_longitude: 10.0,
            anchor_latitude: 50.0,
        });

        let viewer = handle.lock().unwrap();
        assert_eq!(viewer.clock().current, t(0));
        assert_eq!(viewer.camera().destination().unwrap().longitude_deg, 10.0);
        assert!(viewer.light().is_some());
    }
}
