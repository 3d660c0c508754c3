use std::{
    fmt,
    sync::Mutex,
    time::{Duration, Instant},
};

const RULE: &str = "==================================================";

/// Counters shared by all virtual users.
#[derive(Default)]
pub(crate) struct Stats {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    started: Option<Instant>,
    successful: u64,
    failed: u64,
    total_response_ms: f64,
}

impl Stats {
    pub(crate) fn record(&self, success: bool, elapsed: Duration) {
        let mut inner = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        // The clock starts with the first completed request, not with the spawner.
        inner.started.get_or_insert_with(Instant::now);

        if success {
            inner.successful += 1;
        } else {
            inner.failed += 1;
        }

        inner.total_response_ms += elapsed.as_secs_f64() * 1000.0;
    }

    pub(crate) fn summary(&self) -> Summary {
        let inner = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let average_response_ms = match inner.successful + inner.failed {
            0 => 0.0,
            count => inner.total_response_ms / count as f64,
        };

        Summary {
            successful: inner.successful,
            failed: inner.failed,
            average_response_ms,
            duration: inner.started.map(|started| started.elapsed()).unwrap_or_default(),
        }
    }
}

/// Result of a load test run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Requests judged successful.
    pub successful: u64,
    /// Requests that failed or returned an unexpected body.
    pub failed: u64,
    /// Mean latency over all requests, in milliseconds.
    pub average_response_ms: f64,
    /// Time from the first completed request to the end of the run.
    pub duration: Duration,
}

impl Summary {
    /// All recorded requests.
    pub fn total(&self) -> u64 {
        self.successful + self.failed
    }

    /// Percentage of successful requests, 0 when nothing ran.
    pub fn success_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.successful as f64 * 100.0 / total as f64,
        }
    }

    /// Overall verdict derived from the success rate.
    pub fn rating(&self) -> Rating {
        match self.success_rate() {
            rate if rate >= 95.0 => Rating::Excellent,
            rate if rate >= 85.0 => Rating::Good,
            rate if rate >= 70.0 => Rating::Acceptable,
            _ => Rating::Poor,
        }
    }
}

/// Service verdict printed at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    /// At least 95% of requests succeeded.
    Excellent,
    /// At least 85%.
    Good,
    /// At least 70%.
    Acceptable,
    /// Anything lower.
    Poor,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Excellent => f.write_str("✓ Service Status: EXCELLENT"),
            Rating::Good => f.write_str("✓ Service Status: GOOD"),
            Rating::Acceptable => f.write_str("Service Status: ACCEPTABLE"),
            Rating::Poor => f.write_str("✗ Service Status: POOR"),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "AI SERVICE TEST RESULTS")?;
        writeln!(f, "{RULE}")?;

        if self.total() == 0 {
            return writeln!(f, "✗ No requests completed");
        }

        writeln!(f, "Total Requests: {}", self.total())?;
        writeln!(f, "Successful: {} ({:.1}%)", self.successful, self.success_rate())?;
        writeln!(f, "Failed: {}", self.failed)?;
        writeln!(f, "Avg Response Time: {:.0}ms", self.average_response_ms)?;
        writeln!(f, "Test Duration: {:.1}s", self.duration.as_secs_f64())?;
        writeln!(f, "{}", self.rating())?;
        write!(f, "{RULE}")
    }
}
