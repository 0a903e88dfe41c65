use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::visual::seconds_between;

/// What happens when the clock reaches the ends of its range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum_macros::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockRange {
    Unbounded,
    Clamped,
    LoopStop,
}

/// How far one tick moves the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum_macros::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockStep {
    /// `multiplier` seconds per tick, regardless of wall time.
    TickDependent,
    /// Wall time, unscaled.
    SystemClock,
    /// Wall time scaled by `multiplier`.
    SystemClockMultiplier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clock {
    pub start: DateTime<Utc>,
    pub stop: DateTime<Utc>,
    pub current: DateTime<Utc>,
    pub multiplier: f64,
    pub range: ClockRange,
    pub step: ClockStep,
    pub should_animate: bool,
}

impl Clock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            start: now,
            stop: now + Duration::days(1),
            current: now,
            multiplier: 1.0,
            range: ClockRange::Unbounded,
            step: ClockStep::SystemClockMultiplier,
            should_animate: false,
        }
    }

    /// Advance by one tick that took `elapsed` of wall time.
    pub fn tick(&mut self, elapsed: std::time::Duration) -> DateTime<Utc> {
        if !self.should_animate {
            return self.current;
        }

        let seconds = match self.step {
            ClockStep::SystemClockMultiplier => elapsed.as_secs_f64() * self.multiplier,
            ClockStep::TickDependent => self.multiplier,
            ClockStep::SystemClock => elapsed.as_secs_f64(),
        };
        let next = self.current + Duration::microseconds((seconds * 1e6).round() as i64);
        self.current = self.bound(next);
        self.current
    }

    fn bound(&mut self, next: DateTime<Utc>) -> DateTime<Utc> {
        match self.range {
            ClockRange::Unbounded => next,
            ClockRange::Clamped => {
                if next < self.start {
                    self.should_animate = false;
                    self.start
                } else if next > self.stop {
                    self.should_animate = false;
                    self.stop
                } else {
                    next
                }
            }
            ClockRange::LoopStop => {
                if next < self.start {
                    return self.start;
                }
                if next <= self.stop {
                    return next;
                }
                let span = seconds_between(self.start, self.stop);
                if span <= 0.0 {
                    return self.start;
                }
                let over = seconds_between(self.stop, next) % span;
                let over = if over == 0.0 { span } else { over };
                self.start + Duration::microseconds((over * 1e6).round() as i64)
            }
        }
    }
}

/// Visible window of the timeline widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    visible: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl Timeline {
    pub fn visible(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.visible
    }

    pub fn zoom_to(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) {
        if end < start {
            log::warn!("ignoring timeline zoom to reversed range {} .. {}", start, end);
            return;
        }
        self.visible = Some((start, end));
    }
}
