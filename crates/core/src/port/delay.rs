// Delay Port (for testability)

use async_trait::async_trait;
use std::time::Duration;

/// Delay interface (allows recording waits in tests instead of sleeping)
#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Tokio timer delay (production)
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Records requested sleeps and returns immediately
    #[derive(Default)]
    pub struct RecordingDelay {
        sleeps: Mutex<Vec<Duration>>,
    }

    impl RecordingDelay {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Delay for RecordingDelay {
        async fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
        }
    }
}
