//! Bounded action history and derived behavior statistics

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use tokio::time::Instant;

/// Maximum number of retained history entries
pub const HISTORY_CAPACITY: usize = 100;

/// A single recorded pointer action
#[derive(Debug, Clone, Copy)]
pub struct ActionEntry {
    /// Final horizontal coordinate of the action
    pub x: i32,
    /// Final vertical coordinate of the action
    pub y: i32,
    /// Monotonic completion timestamp
    pub at: Instant,
}

/// Fixed-capacity FIFO buffer of recent pointer actions
///
/// Owned exclusively by the behavior engine; once full, each insertion
/// evicts the oldest entry.
#[derive(Debug, Default)]
pub struct ActionHistory {
    entries: VecDeque<ActionEntry>,
    total_actions: u64,
    last_action_at: Option<DateTime<Utc>>,
}

impl ActionHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAPACITY),
            total_actions: 0,
            last_action_at: None,
        }
    }

    /// Record a completed action at its final pointer position
    pub fn record(&mut self, x: i32, y: i32) {
        if self.entries.len() == HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(ActionEntry {
            x,
            y,
            at: Instant::now(),
        });
        self.total_actions += 1;
        self.last_action_at = Some(Utc::now());
    }

    /// Number of retained entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any action has been retained
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Retained entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &ActionEntry> {
        self.entries.iter()
    }

    /// Derive the current behavior pattern snapshot
    ///
    /// Returns a zeroed pattern while fewer than two entries exist. Average
    /// speed is the mean of distance/elapsed over consecutive entry pairs;
    /// pairs with no measurable elapsed time are skipped.
    pub fn pattern(&self) -> BehaviorPattern {
        if self.entries.len() < 2 {
            return BehaviorPattern::default();
        }

        let mut speeds = Vec::with_capacity(self.entries.len() - 1);
        let mut previous: Option<&ActionEntry> = None;
        for entry in &self.entries {
            if let Some(earlier) = previous {
                let dx = (entry.x - earlier.x) as f64;
                let dy = (entry.y - earlier.y) as f64;
                let elapsed = (entry.at - earlier.at).as_secs_f64();
                if elapsed > 0.0 {
                    speeds.push((dx * dx + dy * dy).sqrt() / elapsed);
                }
            }
            previous = Some(entry);
        }

        let average_speed = if speeds.is_empty() {
            0.0
        } else {
            speeds.iter().sum::<f64>() / speeds.len() as f64
        };

        BehaviorPattern {
            total_actions: self.total_actions,
            history_length: self.entries.len(),
            average_speed,
            last_action_time: self.last_action_at,
        }
    }
}

/// Derived, read-only behavior statistics
///
/// Serializable for diagnostic/analytics consumers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BehaviorPattern {
    /// Actions recorded over the engine lifetime
    pub total_actions: u64,
    /// Entries currently retained in the buffer
    pub history_length: usize,
    /// Mean pointer speed in pixels per second over consecutive entries
    pub average_speed: f64,
    /// Wall-clock time of the most recent recorded action
    pub last_action_time: Option<DateTime<Utc>>,
}
