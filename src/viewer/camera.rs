use std::time::Duration;

use crate::geo::{Cartesian3, Cartographic};

pub const DEFAULT_CAMERA_HEIGHT_M: f64 = 20_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Flight {
    from: Cartographic,
    to: Cartographic,
    duration: Duration,
    elapsed: Duration,
}

impl Flight {
    fn location(&self) -> Cartographic {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        let s = ease_in_out_cubic(t);

        let dlon = (self.to.longitude_deg - self.from.longitude_deg + 540.0).rem_euclid(360.0) - 180.0;
        let lon = self.from.longitude_deg + dlon * s;
        Cartographic {
            longitude_deg: (lon + 540.0).rem_euclid(360.0) - 180.0,
            latitude_deg: lerp(self.from.latitude_deg, self.to.latitude_deg, s),
            height_m: lerp(self.from.height_m, self.to.height_m, s),
        }
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// A camera that always looks straight down at the point beneath it, with
/// north up.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    location: Cartographic,
    flight: Option<Flight>,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Cartographic::from_degrees(0.0, 0.0, DEFAULT_CAMERA_HEIGHT_M))
    }
}

impl Camera {
    pub fn new(location: Cartographic) -> Self {
        Self {
            location,
            flight: None,
        }
    }

    pub fn location(&self) -> Cartographic {
        self.location
    }

    /// Forward vector in Earth-fixed coordinates.
    pub fn direction(&self) -> Cartesian3 {
        self.location.surface_normal().scale(-1.0)
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    pub fn destination(&self) -> Option<Cartographic> {
        self.flight.map(|f| f.to)
    }

    /// Start a smoothed flight to `destination`. A zero duration jumps
    /// there immediately.
    pub fn fly_to(&mut self, destination: Cartographic, duration: Duration) {
        if duration.is_zero() {
            self.location = destination;
            self.flight = None;
            return;
        }
        self.flight = Some(Flight {
            from: self.location,
            to: destination,
            duration,
            elapsed: Duration::ZERO,
        });
    }

    pub fn advance(&mut self, elapsed: Duration) {
        let Some(flight) = self.flight.as_mut() else {
            return;
        };
        flight.elapsed += elapsed;
        if flight.finished() {
            self.location = flight.to;
            self.flight = None;
        } else {
            self.location = flight.location();
        }
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
