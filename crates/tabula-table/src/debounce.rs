use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// Delays an action until input has been quiet for `interval`.
///
/// Each `submit` aborts the pending action and schedules the new one, so only
/// the last action of a burst ever runs. Dropping the debouncer aborts
/// whatever is still pending.
pub struct Debouncer {
    interval: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Schedule `action`. Must be called from within a tokio runtime.
    pub fn submit<F>(&mut self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let interval = self.interval;
        debug!(interval_ms = interval.as_millis() as u64, "debounce scheduled");
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            action();
        }));
    }

    /// Abort the pending action, if any. Returns whether one was aborted.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                debug!("pending debounce cancelled");
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    type Action = Box<dyn FnOnce() + Send>;

    fn recorder() -> (Arc<Mutex<Vec<&'static str>>>, impl Fn(&'static str) -> Action) {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&fired);
        let make = move |value: &'static str| -> Action {
            let sink = Arc::clone(&sink);
            Box::new(move || sink.lock().unwrap().push(value))
        };
        (fired, make)
    }

    #[tokio::test(start_paused = true)]
    async fn only_last_submission_fires() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.submit(make("a"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.submit(make("ab"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.submit(make("abc"));

        tokio::time::sleep(Duration::from_millis(499)).await;
        assert!(fired.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["abc"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn separate_quiet_windows_fire_separately() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.submit(make("first"));
        tokio::time::sleep(Duration::from_millis(600)).await;
        debouncer.submit(make("second"));
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert_eq!(*fired.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_action() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.submit(make("a"));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(fired.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_action() {
        let (fired, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));

        debouncer.submit(make("a"));
        drop(debouncer);
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(fired.lock().unwrap().is_empty());
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn schedule_and_cancel_are_logged() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (_, make) = recorder();
        let mut debouncer = Debouncer::new(Duration::from_millis(500));
        debouncer.submit(make("a"));
        debouncer.cancel();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("debounce scheduled"), "{output}");
        assert!(output.contains("pending debounce cancelled"), "{output}");
    }
}
