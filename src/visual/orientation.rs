use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::geo::{heading_pitch, Cartesian3};

use super::sampled::SampledPosition;

const HALF_STEP: Duration = Duration::milliseconds(500);

/// Attitude of the moving model in its local horizon frame, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Orientation {
    pub heading_deg: f64,
    pub pitch_deg: f64,
    pub roll_deg: f64,
}

/// Orientation implied by the direction of travel of a sampled position.
///
/// The recorded `course` of each point is not used; the heading follows the
/// interpolated path so it changes smoothly between samples.
#[derive(Debug, Clone, Copy)]
pub struct VelocityOrientation<'a> {
    position: &'a SampledPosition,
}

impl<'a> VelocityOrientation<'a> {
    pub fn new(position: &'a SampledPosition) -> Self {
        Self { position }
    }

    /// Unit vector of travel around `time`, or `None` while stationary.
    pub fn direction_at(&self, time: DateTime<Utc>) -> Option<Cartesian3> {
        let before = self.position.position_at(time - HALF_STEP)?;
        let after = self.position.position_at(time + HALF_STEP)?;
        after.sub(before).normalize()
    }

    /// `None` means the model keeps its identity orientation.
    pub fn at(&self, time: DateTime<Utc>) -> Option<Orientation> {
        let direction = self.direction_at(time)?;
        let origin = self.position.cartographic_at(time)?;
        let (heading_deg, pitch_deg) = heading_pitch(&origin, direction)?;
        Some(Orientation {
            heading_deg,
            pitch_deg,
            roll_deg: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::geo::Cartographic;

    fn t(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, minute, 0).unwrap()
    }

    fn sampled(coords: &[(f64, f64, u32)]) -> SampledPosition {
        let mut property = SampledPosition::new();
        for &(lon, lat, minute) in coords {
            property.add_sample(
                t(minute),
                Cartographic::from_degrees(lon, lat, 100.0).to_cartesian(),
            );
        }
        property
    }

    #[test]
    fn follows_direction_of_travel_not_course() {
        // North first, then east.
        let property = sampled(&[(10.0, 50.0, 0), (10.0, 50.1, 10), (10.1, 50.1, 20)]);
        let orientation = VelocityOrientation::new(&property);

        let north = orientation.at(t(5)).unwrap();
        assert!(north.heading_deg < 0.5 || north.heading_deg > 359.5, "{north:?}");
        assert!(north.pitch_deg.abs() < 1.0);
        assert_eq!(north.roll_deg, 0.0);

        let east = orientation.at(t(15)).unwrap();
        assert!((east.heading_deg - 90.0).abs() < 0.5, "{east:?}");
    }

    #[test]
    fn defined_at_endpoints() {
        let property = sampled(&[(10.0, 50.0, 0), (10.1, 50.0, 10)]);
        let orientation = VelocityOrientation::new(&property);
        assert!(orientation.at(t(0)).is_some());
        assert!(orientation.at(t(10)).is_some());
    }

    #[test]
    fn stationary_vessel_has_no_orientation() {
        let property = sampled(&[(10.0, 50.0, 0), (10.0, 50.0, 10)]);
        let orientation = VelocityOrientation::new(&property);
        assert!(orientation.direction_at(t(5)).is_none());
        assert!(orientation.at(t(5)).is_none());
        assert!(orientation.at(t(30)).is_none());
    }
}
