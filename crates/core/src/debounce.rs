//! Single-slot delayed task: arming a new task aborts the one still waiting.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` once `delay` has passed without another `arm`.
    pub fn arm<F>(&mut self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter_task(hits: &Arc<AtomicUsize>, value: usize) -> impl Future<Output = ()> + Send + 'static {
        let hits = hits.clone();
        async move {
            hits.fetch_add(value, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_cancels_the_waiting_task() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut d = Debouncer::new();

        d.arm(Duration::from_millis(200), counter_task(&hits, 1));
        tokio::time::sleep(Duration::from_millis(150)).await;
        d.arm(Duration::from_millis(200), counter_task(&hits, 10));
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
        assert!(d.is_armed());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 10);
        assert!(!d.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_cancels() {
        let hits = Arc::new(AtomicUsize::new(0));
        {
            let mut d = Debouncer::new();
            d.arm(Duration::from_millis(200), counter_task(&hits, 1));
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
