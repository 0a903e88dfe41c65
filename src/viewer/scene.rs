use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::geo::Cartesian3;
use crate::visual::Color;

use super::camera::Camera;
use super::clock::{Clock, Timeline};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub direction: Cartesian3,
}

/// The rendering surface the synchronizer drives.
pub trait Viewer {
    fn clock(&self) -> &Clock;
    fn clock_mut(&mut self) -> &mut Clock;
    fn timeline_mut(&mut self) -> &mut Timeline;
    fn camera(&self) -> &Camera;
    fn camera_mut(&mut self) -> &mut Camera;
    fn set_light(&mut self, light: DirectionalLight);
}

/// Headless viewer: keeps the clock, timeline, camera and light state and
/// advances it on demand instead of rendering.
#[derive(Debug, Clone)]
pub struct SceneViewer {
    clock: Clock,
    timeline: Timeline,
    camera: Camera,
    light: Option<DirectionalLight>,
}

impl SceneViewer {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            clock: Clock::new(now),
            timeline: Timeline::default(),
            camera: Camera::default(),
            light: None,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn light(&self) -> Option<&DirectionalLight> {
        self.light.as_ref()
    }

    /// One frame: tick the clock and move any camera flight along.
    pub fn advance(&mut self, elapsed: Duration) -> DateTime<Utc> {
        self.camera.advance(elapsed);
        self.clock.tick(elapsed)
    }
}

impl Viewer for SceneViewer {
    fn clock(&self) -> &Clock {
        &self.clock
    }

    fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn set_light(&mut self, light: DirectionalLight) {
        self.light = Some(light);
    }
}
