use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Hooks a caller can use to follow or stop a segmentation run.
///
/// All methods are called synchronously from the thread running the
/// segmentation. Cancellation is checked once at the top of each peel-off
/// iteration; a plane fit already in progress is never interrupted.
pub trait SegmentationObserver {
    /// Overall progress in `0.0..=100.0`.
    fn on_progress(&mut self, _percent: f64) {}

    fn on_status(&mut self, _message: &str) {}

    fn is_cancelled(&self) -> bool {
        false
    }
}

impl SegmentationObserver for () {}

impl<T: SegmentationObserver + ?Sized> SegmentationObserver for &mut T {
    fn on_progress(&mut self, percent: f64) {
        (**self).on_progress(percent)
    }

    fn on_status(&mut self, message: &str) {
        (**self).on_status(message)
    }

    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Shared flag for cancelling a run from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl SegmentationObserver for CancelFlag {
    fn is_cancelled(&self) -> bool {
        CancelFlag::is_cancelled(self)
    }
}

/// Adapts a pair of closures to [`SegmentationObserver`].
pub struct FnObserver<P, S> {
    progress: P,
    status: S,
    cancel: Option<CancelFlag>,
}

impl<P, S> FnObserver<P, S>
where
    P: FnMut(f64),
    S: FnMut(&str),
{
    pub fn new(progress: P, status: S) -> Self {
        Self {
            progress,
            status,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }
}

impl<P, S> SegmentationObserver for FnObserver<P, S>
where
    P: FnMut(f64),
    S: FnMut(&str),
{
    fn on_progress(&mut self, percent: f64) {
        (self.progress)(percent)
    }

    fn on_status(&mut self, message: &str) {
        (self.status)(message)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let other = flag.clone();
        assert!(!SegmentationObserver::is_cancelled(&flag));
        other.cancel();
        assert!(SegmentationObserver::is_cancelled(&flag));
    }

    #[test]
    fn fn_observer_forwards_calls() {
        let mut seen = Vec::new();
        let mut messages = Vec::new();
        {
            let mut obs = FnObserver::new(|p| seen.push(p), |m: &str| messages.push(m.to_string()));
            obs.on_progress(10.0);
            obs.on_status("hello");
            assert!(!obs.is_cancelled());
        }
        assert_eq!(seen, vec![10.0]);
        assert_eq!(messages, vec!["hello".to_string()]);
    }
}
