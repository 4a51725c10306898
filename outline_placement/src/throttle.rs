// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer sample throttling.

use kurbo::Point;

/// Admits pointer samples at most once per interval, and only when the pointer moved.
///
/// Timestamps are supplied by the caller in milliseconds; there is no internal clock. The
/// interval check runs first and restarts the interval even when the sample is then dropped
/// for not having moved.
#[derive(Clone, Debug, Default)]
pub struct Throttle {
    /// Minimum time between two admitted samples, in milliseconds.
    pub interval_ms: u64,
    last_run: Option<u64>,
    last_position: Option<Point>,
}

impl Throttle {
    /// Create a throttle with the given interval.
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_run: None,
            last_position: None,
        }
    }

    /// Whether the sample at `position` and time `now_ms` should be processed.
    pub fn admit(&mut self, position: Point, now_ms: u64) -> bool {
        if let Some(last) = self.last_run {
            if now_ms.saturating_sub(last) < self.interval_ms {
                return false;
            }
        }
        self.last_run = Some(now_ms);

        if self.last_position == Some(position) {
            return false;
        }
        self.last_position = Some(position);
        true
    }

    /// Forget previous samples.
    pub fn reset(&mut self) {
        self.last_run = None;
        self.last_position = None;
    }
}
