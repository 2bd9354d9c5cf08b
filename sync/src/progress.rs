use std::time::Duration;

/// Snapshot emitted before each id and once more when the pass completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncProgress {
    /// Ids settled as cached so far
    pub current: u32,
    pub total: u32,
    /// Id about to be processed (0 on the completion event)
    pub current_id: u32,
    pub failed: u32,
    pub is_complete: bool,
    /// Time since the pass started
    pub elapsed: Duration,
}

impl SyncProgress {
    /// `current / total * 100`, or 0 for an empty run
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.current) / f64::from(self.total) * 100.0
        }
    }
}

/// Receives progress inline, on the task running the sync
pub trait ProgressSink {
    fn report(&mut self, progress: SyncProgress);
}

impl<F: FnMut(SyncProgress)> ProgressSink for F {
    fn report(&mut self, progress: SyncProgress) {
        self(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let p = SyncProgress {
            current: 250,
            total: 1000,
            ..Default::default()
        };
        assert!((p.percentage() - 25.0).abs() < f64::EPSILON);
        assert_eq!(SyncProgress::default().percentage(), 0.0);
    }

    #[test]
    fn test_closure_is_a_sink() {
        let mut seen = Vec::new();
        let mut sink = |p: SyncProgress| seen.push(p.current_id);
        sink.report(SyncProgress {
            current_id: 3,
            ..Default::default()
        });
        assert_eq!(seen, vec![3]);
    }
}
