//! Phase timing for the four protocol phases.
//!
//! Intended for debugging, benchmarking, and report output; not part of core
//! correctness. Timings are monotonic intervals taken on the local rank.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Stopwatch yielding the elapsed time since the previous lap.
#[derive(Debug)]
pub struct PhaseTimer {
    last: Instant,
}

impl PhaseTimer {
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Duration since construction or the previous `lap` call.
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        elapsed
    }
}

/// Wall-clock split of one run: distribute, local sort, exchange, collect.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTimes {
    pub distribute: Duration,
    pub local_sort: Duration,
    pub exchange: Duration,
    pub collect: Duration,
}

impl PhaseTimes {
    pub fn total(&self) -> Duration {
        self.distribute + self.local_sort + self.exchange + self.collect
    }

    /// Share of the total spent in each phase, in phase order. All zeros for
    /// an empty total, so the report never divides by zero.
    pub fn percentages(&self) -> [f64; 4] {
        let total = self.total().as_secs_f64();
        if total == 0.0 {
            return [0.0; 4];
        }
        [
            self.distribute.as_secs_f64() / total * 100.0,
            self.local_sort.as_secs_f64() / total * 100.0,
            self.exchange.as_secs_f64() / total * 100.0,
            self.collect.as_secs_f64() / total * 100.0,
        ]
    }
}

impl fmt::Display for PhaseTimes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [d, s, e, c] = self.percentages();
        write!(
            f,
            "distribute {:?} ({d:.1}%), local sort {:?} ({s:.1}%), exchange {:?} ({e:.1}%), collect {:?} ({c:.1}%), total {:?}",
            self.distribute,
            self.local_sort,
            self.exchange,
            self.collect,
            self.total(),
        )
    }
}
