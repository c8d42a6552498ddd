//! Frame and action counters

use std::time::{Duration, Instant};

/// What a node has done since it was built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStats {
    pub ticks: u64,
    pub actions: u64,
    pub uptime: Duration,
}

impl NodeStats {
    /// Average frame ticks per second over the uptime
    pub fn frame_rate(&self) -> f64 {
        let secs = self.uptime.as_secs_f64();
        if secs > 0.0 {
            self.ticks as f64 / secs
        } else {
            0.0
        }
    }
}

impl std::fmt::Display for NodeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} frames ({:.1}/s), {} actions in {:.1}s",
            self.ticks,
            self.frame_rate(),
            self.actions,
            self.uptime.as_secs_f64()
        )
    }
}

// Owned by the node task, so plain counters suffice
#[derive(Debug)]
pub(crate) struct StatsTracker {
    ticks: u64,
    actions: u64,
    started: Instant,
}

impl StatsTracker {
    pub(crate) fn new() -> Self {
        Self {
            ticks: 0,
            actions: 0,
            started: Instant::now(),
        }
    }

    pub(crate) fn add_tick(&mut self) {
        self.ticks += 1;
    }

    pub(crate) fn add_action(&mut self) {
        self.actions += 1;
    }

    pub(crate) fn snapshot(&self) -> NodeStats {
        NodeStats {
            ticks: self.ticks,
            actions: self.actions,
            uptime: self.started.elapsed(),
        }
    }
}
