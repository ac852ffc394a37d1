//! Bookkeeping for the single in-flight request.

use web_time::{Duration, Instant};

use crate::model::FileKey;

/// Identifies one submission. Completions carrying a stale id are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

/// The request currently in flight.
#[derive(Debug, Clone)]
pub struct Submission {
    pub request_id: RequestId,
    pub file_key: FileKey,
    pub started_at: Instant,
}

impl Submission {
    pub fn new(request_id: RequestId, file_key: FileKey) -> Self {
        Self {
            request_id,
            file_key,
            started_at: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
