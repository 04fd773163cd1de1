/// Token handed out when a fetch is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(u64);

/// Issues increasing request ids so that a response arriving after a newer
/// request from the same tracker can be recognised and dropped. Each query
/// type owns its own tracker.
#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestId {
        self.latest += 1;
        RequestId(self.latest)
    }

    pub fn is_latest(&self, id: &RequestId) -> bool {
        self.latest == id.0
    }
}
