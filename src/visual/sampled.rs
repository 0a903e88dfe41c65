use chrono::{DateTime, Utc};

use crate::geo::{Cartesian3, Cartographic};

/// Seconds from `from` to `to`, negative when `to` is earlier.
pub fn seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let delta = to - from;
    delta
        .num_microseconds()
        .map(|us| us as f64 / 1e6)
        .unwrap_or_else(|| delta.num_seconds() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    pub time: DateTime<Utc>,
    pub position: Cartesian3,
}

/// Position as a function of time, built from discrete samples.
///
/// Between samples the position is interpolated linearly in Earth-fixed
/// space. Outside the sampled range it is held at the nearest endpoint.
/// Samples are expected in ascending time order; equal times are kept as
/// given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampledPosition {
    samples: Vec<PositionSample>,
}

impl SampledPosition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, time: DateTime<Utc>, position: Cartesian3) {
        self.samples.push(PositionSample { time, position });
    }

    pub fn samples(&self) -> &[PositionSample] {
        &self.samples
    }

    /// Position at `time`, or `None` if no samples were added.
    pub fn position_at(&self, time: DateTime<Utc>) -> Option<Cartesian3> {
        let first = self.samples.first()?;
        let idx = self.samples.partition_point(|s| s.time <= time);
        if idx == 0 {
            return Some(first.position);
        }
        if idx == self.samples.len() {
            return self.samples.last().map(|s| s.position);
        }

        let before = &self.samples[idx - 1];
        let after = &self.samples[idx];
        let span = seconds_between(before.time, after.time);
        if span <= 0.0 {
            return Some(before.position);
        }
        let t = seconds_between(before.time, time) / span;
        Some(before.position.lerp(after.position, t))
    }

    pub fn cartographic_at(&self, time: DateTime<Utc>) -> Option<Cartographic> {
        self.position_at(time).map(Cartesian3::to_cartographic)
    }
}
