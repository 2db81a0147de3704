use crate::runtime::AsyncHandle;

/// Tracks the latest request issued for one kind of service call.
///
/// Each new request gets the next sequence number and cancels the one before
/// it. A response is only applied when it carries the latest number, so a slow
/// answer to an old request can never overwrite a newer one.
#[derive(Default)]
pub struct RequestSlot {
    latest: u64,
    in_flight: Option<Box<dyn AsyncHandle>>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the current request and reserves the next sequence number
    pub fn next_seq(&mut self) -> u64 {
        self.cancel();
        self.latest += 1;
        self.latest
    }

    /// Remembers the handle of the request issued under the latest number
    pub fn track(&mut self, handle: Box<dyn AsyncHandle>) {
        self.in_flight = Some(handle);
    }

    /// True when `seq` is the latest request and it was not cancelled since
    pub fn is_current(&self, seq: u64) -> bool {
        seq == self.latest && self.in_flight.is_some()
    }

    /// Marks the latest request as answered
    pub fn complete(&mut self, seq: u64) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.in_flight = None;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Cancels whatever is in flight; its response will be ignored
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.cancel();
        }
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct FlagHandle(Arc<AtomicBool>);

    impl AsyncHandle for FlagHandle {
        fn is_finished(&self) -> bool {
            false
        }

        fn cancel(&self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_only_latest_is_current() {
        let mut slot = RequestSlot::new();
        let first = slot.next_seq();
        let first_cancelled = Arc::new(AtomicBool::new(false));
        slot.track(Box::new(FlagHandle(first_cancelled.clone())));
        assert!(slot.is_current(first));

        let second = slot.next_seq();
        slot.track(Box::new(FlagHandle(Arc::new(AtomicBool::new(false)))));
        assert!(first_cancelled.load(Ordering::SeqCst));
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));

        assert!(!slot.complete(first));
        assert!(slot.complete(second));
        assert!(!slot.is_pending());
        // A duplicate delivery is ignored
        assert!(!slot.complete(second));
    }

    #[test]
    fn test_cancel_invalidates_latest() {
        let mut slot = RequestSlot::new();
        let seq = slot.next_seq();
        slot.track(Box::new(FlagHandle(Arc::new(AtomicBool::new(false)))));
        slot.cancel();
        assert!(!slot.is_current(seq));
        assert_eq!(slot.latest(), seq);
    }
}
