//! Runtime abstraction layer for async operations
//!
//! Service calls are plain futures; this module decides where they run. The
//! screen only sees [`AsyncSpawner`], so the same code drives a tokio runtime in
//! the app, runs inline in headless tools, and runs step by step in tests.

use crate::{MapError, Result};
use futures::future::BoxFuture;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(&self, future: BoxFuture<'static, ()>) -> Box<dyn AsyncHandle>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    fn is_finished(&self) -> bool;

    /// Cancel the task; a cancelled task never reports back
    fn cancel(&self);
}

/// Convenience wrapper for spawning with type safety
pub fn spawn<F>(spawner: &dyn AsyncSpawner, future: F) -> Box<dyn AsyncHandle>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    spawner.spawn_boxed(Box::pin(future))
}

/// Spawner used when none is configured explicitly
pub fn default_spawner() -> Result<Arc<dyn AsyncSpawner>> {
    #[cfg(feature = "tokio-runtime")]
    {
        Ok(Arc::new(spawners::tokio_impl::TokioSpawner::current()?))
    }

    #[cfg(not(feature = "tokio-runtime"))]
    {
        Err(MapError::Runtime(
            "no async runtime available, enable 'tokio-runtime' or pass a spawner".into(),
        ))
    }
}

/// Default spawner implementations
pub mod spawners {
    use super::*;

    #[cfg(feature = "tokio-runtime")]
    pub mod tokio_impl {
        use super::*;
        use ::tokio::runtime::Handle;
        use ::tokio::task::JoinHandle;

        /// Tokio-based async spawner
        #[derive(Clone)]
        pub struct TokioSpawner {
            handle: Handle,
        }

        impl TokioSpawner {
            pub fn new(handle: Handle) -> Self {
                Self { handle }
            }

            /// Spawner for the runtime the caller is running inside
            pub fn current() -> Result<Self> {
                Handle::try_current()
                    .map(Self::new)
                    .map_err(|e| MapError::Runtime(e.to_string()))
            }
        }

        impl AsyncSpawner for TokioSpawner {
            fn spawn_boxed(&self, future: BoxFuture<'static, ()>) -> Box<dyn AsyncHandle> {
                Box::new(TokioHandle(self.handle.spawn(future)))
            }
        }

        struct TokioHandle(JoinHandle<()>);

        impl AsyncHandle for TokioHandle {
            fn is_finished(&self) -> bool {
                self.0.is_finished()
            }

            fn cancel(&self) {
                self.0.abort();
            }
        }
    }

    /// Runs each future to completion on the calling thread before returning
    #[derive(Debug, Default, Clone, Copy)]
    pub struct InlineSpawner;

    impl AsyncSpawner for InlineSpawner {
        fn spawn_boxed(&self, future: BoxFuture<'static, ()>) -> Box<dyn AsyncHandle> {
            futures::executor::block_on(future);
            Box::new(FinishedHandle)
        }
    }

    struct FinishedHandle;

    impl AsyncHandle for FinishedHandle {
        fn is_finished(&self) -> bool {
            true
        }

        fn cancel(&self) {}
    }

    struct Deferred {
        future: BoxFuture<'static, ()>,
        state: Arc<DeferredState>,
    }

    #[derive(Default)]
    struct DeferredState {
        finished: AtomicBool,
        cancelled: AtomicBool,
    }

    /// Queues futures until the owner decides to run them
    ///
    /// Completion order is fully controlled by the caller, which makes
    /// out-of-order responses reproducible. Clones share the same queue.
    #[derive(Clone, Default)]
    pub struct DeferredSpawner {
        queue: Arc<Mutex<VecDeque<Deferred>>>,
    }

    impl DeferredSpawner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of queued tasks that were not cancelled
        pub fn pending(&self) -> usize {
            self.queue
                .lock()
                .map(|queue| {
                    queue
                        .iter()
                        .filter(|task| !task.state.cancelled.load(Ordering::SeqCst))
                        .count()
                })
                .unwrap_or(0)
        }

        /// Runs the oldest queued task; false when nothing was left to run
        pub fn run_next(&self) -> bool {
            let task = self.queue.lock().ok().and_then(|mut queue| queue.pop_front());
            Self::run(task)
        }

        /// Runs the most recently queued task
        pub fn run_last(&self) -> bool {
            let task = self.queue.lock().ok().and_then(|mut queue| queue.pop_back());
            Self::run(task)
        }

        /// Runs queued tasks oldest first, including any they queue themselves
        pub fn run_all(&self) -> usize {
            let mut ran = 0;
            while self.run_next() {
                ran += 1;
            }
            ran
        }

        fn run(task: Option<Deferred>) -> bool {
            let Some(task) = task else {
                return false;
            };
            if !task.state.cancelled.load(Ordering::SeqCst) {
                futures::executor::block_on(task.future);
            }
            task.state.finished.store(true, Ordering::SeqCst);
            true
        }
    }

    impl AsyncSpawner for DeferredSpawner {
        fn spawn_boxed(&self, future: BoxFuture<'static, ()>) -> Box<dyn AsyncHandle> {
            let state = Arc::new(DeferredState::default());
            if let Ok(mut queue) = self.queue.lock() {
                queue.push_back(Deferred {
                    future,
                    state: state.clone(),
                });
            }
            Box::new(DeferredHandle(state))
        }
    }

    struct DeferredHandle(Arc<DeferredState>);

    impl AsyncHandle for DeferredHandle {
        fn is_finished(&self) -> bool {
            self.0.finished.load(Ordering::SeqCst)
        }

        fn cancel(&self) {
            self.0.cancelled.store(true, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::spawners::{DeferredSpawner, InlineSpawner};
    use super::*;

    #[test]
    fn test_inline_spawner_runs_immediately() {
        let hits = Arc::new(Mutex::new(0));
        let counter = hits.clone();
        let handle = spawn(&InlineSpawner, async move {
            *counter.lock().unwrap() += 1;
        });
        assert!(handle.is_finished());
        assert_eq!(*hits.lock().unwrap(), 1);
    }

    #[test]
    fn test_deferred_spawner_ordering_and_cancel() {
        let spawner = DeferredSpawner::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for id in 0..3 {
            let log = log.clone();
            handles.push(spawn(&spawner, async move {
                log.lock().unwrap().push(id);
            }));
        }
        assert_eq!(spawner.pending(), 3);

        handles[1].cancel();
        assert_eq!(spawner.pending(), 2);

        assert!(spawner.run_last());
        assert!(handles[2].is_finished());
        assert!(!handles[0].is_finished());

        assert_eq!(spawner.run_all(), 2);
        assert!(!spawner.run_next());
        assert_eq!(*log.lock().unwrap(), vec![2, 0]);
    }

    #[cfg(feature = "tokio-runtime")]
    #[::tokio::test]
    async fn test_tokio_spawner() {
        let spawner = default_spawner().unwrap();
        let handle = spawn(spawner.as_ref(), async {
            ::tokio::time::sleep(::tokio::time::Duration::from_millis(10)).await;
        });

        assert!(!handle.is_finished());

        ::tokio::time::sleep(::tokio::time::Duration::from_millis(50)).await;
        assert!(handle.is_finished());
    }
}
