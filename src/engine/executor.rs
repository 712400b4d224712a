//! Main-context executor
//!
//! Engine callbacks may fire on I/O threads; anything UI-facing must run on
//! the engine's designated main context. `MainContext` is that context: a
//! clonable handle schedules boxed futures from any thread, and the owning
//! side drains them in scheduling order.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use super::{EngineError, EngineResult};

type Task = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// The receiving half of the main context. Owned by whatever drives the
/// engine's primary loop.
pub struct MainContext {
    rx: mpsc::UnboundedReceiver<Task>,
    handle: MainContextHandle,
}

impl MainContext {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            rx,
            handle: MainContextHandle { tx },
        }
    }

    /// Get a handle for scheduling work onto this context
    pub fn handle(&self) -> MainContextHandle {
        self.handle.clone()
    }

    /// Run every task scheduled so far, in scheduling order, then return
    pub async fn run_pending(&mut self) {
        while let Ok(task) = self.rx.try_recv() {
            task.await;
        }
    }

    /// Drive the context until every handle has been dropped
    pub async fn run(mut self) {
        drop(self.handle);
        while let Some(task) = self.rx.recv().await {
            task.await;
        }
    }
}

impl Default for MainContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A handle for scheduling work onto the main context from any thread
#[derive(Clone)]
pub struct MainContextHandle {
    tx: mpsc::UnboundedSender<Task>,
}

impl MainContextHandle {
    /// Hand a unit of work to the main context. Never blocks; the task runs
    /// the next time the context is drained.
    pub fn schedule<F>(&self, task: F) -> EngineResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tx
            .send(Box::pin(task))
            .map_err(|_| EngineError::MainContextClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_tasks_run_in_scheduling_order() {
        let mut ctx = MainContext::new();
        let handle = ctx.handle();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..5 {
            let seen = seen.clone();
            handle
                .schedule(async move {
                    seen.lock().unwrap().push(i);
                })
                .unwrap();
        }

        ctx.run_pending().await;
        assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_schedule_after_context_dropped_fails() {
        let ctx = MainContext::new();
        let handle = ctx.handle();
        drop(ctx);

        let result = handle.schedule(async {});
        assert!(matches!(result, Err(EngineError::MainContextClosed)));
    }

    #[tokio::test]
    async fn test_run_pending_drains_only_whats_there() {
        let mut ctx = MainContext::new();
        let handle = ctx.handle();
        let seen = Arc::new(Mutex::new(0u32));

        let seen2 = seen.clone();
        handle.schedule(async move { *seen2.lock().unwrap() += 1 }).unwrap();

        ctx.run_pending().await;
        assert_eq!(*seen.lock().unwrap(), 1);

        // Nothing pending, returns immediately
        ctx.run_pending().await;
        assert_eq!(*seen.lock().unwrap(), 1);
    }
}
