//! Failure reporter that keeps failures in memory for inspection.

use std::sync::{Arc, Mutex};

use crate::ports::{FailureReporter, PipelineFailure};

#[derive(Debug, Clone, Default)]
pub struct RecordingFailureReporter {
    reported: Arc<Mutex<Vec<PipelineFailure>>>,
}

impl RecordingFailureReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every failure reported so far, oldest first.
    pub fn reported(&self) -> Vec<PipelineFailure> {
        self.reported
            .lock()
            .map(|r| r.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn count(&self) -> usize {
        self.reported().len()
    }
}

impl FailureReporter for RecordingFailureReporter {
    fn report(&self, failure: &PipelineFailure) {
        let mut reported = self
            .reported
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        reported.push(failure.clone());
    }
}
