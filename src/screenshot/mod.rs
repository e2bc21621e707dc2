//! Screenshot engine.
//!
//! Every capture runs in a freshly launched, isolated browser that is torn down
//! before the result is returned, whatever the outcome. The number of live
//! browsers is capped; extra requests wait for a free slot.

mod chromium;

pub use chromium::ChromiumLauncher;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::time::{timeout_at, Instant};

use crate::errors::AppError;

/// Page size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Starts browser processes.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self, viewport: Viewport) -> Result<Box<dyn BrowserSession>, AppError>;
}

/// One running browser process.
#[async_trait]
pub trait BrowserSession: Send {
    /// Load `html` directly into a page, wait for it to settle and capture a PNG.
    async fn capture_png(&mut self, html: &str) -> Result<Vec<u8>, AppError>;

    /// Terminate the browser process. Must not fail.
    async fn close(&mut self);
}

/// Renders HTML documents to PNG bytes.
pub struct ScreenshotEngine {
    launcher: Arc<dyn BrowserLauncher>,
    viewport: Viewport,
    render_timeout: Duration,
    permits: Semaphore,
}

impl ScreenshotEngine {
    pub fn new(
        launcher: Arc<dyn BrowserLauncher>,
        viewport: Viewport,
        render_timeout: Duration,
        max_concurrent: usize,
    ) -> Self {
        Self {
            launcher,
            viewport,
            render_timeout,
            permits: Semaphore::new(max_concurrent.max(1)),
        }
    }

    /// Capture `html` as a PNG.
    ///
    /// Launch and capture share one deadline. The browser is closed exactly once
    /// after it has been launched, on success, capture failure and timeout alike.
    pub async fn render(&self, html: &str) -> Result<Vec<u8>, AppError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| AppError::Render("Screenshot engine is shut down".to_string()))?;

        let deadline = Instant::now() + self.render_timeout;

        let mut session = match timeout_at(deadline, self.launcher.launch(self.viewport)).await {
            Ok(session) => session?,
            Err(_) => {
                return Err(AppError::Render(format!(
                    "Browser launch timed out after {:?}",
                    self.render_timeout
                )))
            }
        };
        tracing::debug!("Browser launched");

        let result = match timeout_at(deadline, session.capture_png(html)).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Render(format!(
                "Screenshot timed out after {:?}",
                self.render_timeout
            ))),
        };

        session.close().await;

        if let Ok(png) = &result {
            tracing::debug!(size = png.len(), "Screenshot captured");
        }
        result
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{FakeBehavior, FakeLauncher, FAKE_PNG};
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1200,
        height: 630,
    };

    fn engine(launcher: Arc<FakeLauncher>, timeout: Duration, max: usize) -> ScreenshotEngine {
        ScreenshotEngine::new(launcher, VIEWPORT, timeout, max)
    }

    #[tokio::test]
    async fn test_success_closes_once() {
        let (launcher, counters) = FakeLauncher::new(FakeBehavior::Succeed);
        let engine = engine(launcher, Duration::from_secs(5), 1);

        let png = engine.render("<html></html>").await.unwrap();

        assert_eq!(png, FAKE_PNG);
        assert_eq!(counters.launches(), 1);
        assert_eq!(counters.closes(), 1);
        assert_eq!(counters.last_html().as_deref(), Some("<html></html>"));
    }

    #[tokio::test]
    async fn test_capture_failure_closes_once() {
        let (launcher, counters) = FakeLauncher::new(FakeBehavior::FailCapture);
        let engine = engine(launcher, Duration::from_secs(5), 1);

        let err = engine.render("<html></html>").await.unwrap_err();

        assert!(matches!(err, AppError::Render(_)));
        assert_eq!(counters.closes(), 1);
    }

    #[tokio::test]
    async fn test_timeout_closes_once() {
        let (launcher, counters) = FakeLauncher::new(FakeBehavior::Hang);
        let engine = engine(launcher, Duration::from_millis(50), 1);

        let err = engine.render("<html></html>").await.unwrap_err();

        assert!(matches!(err, AppError::Render(_)));
        assert!(err.message().contains("timed out"));
        assert_eq!(counters.launches(), 1);
        assert_eq!(counters.closes(), 1);
    }

    #[tokio::test]
    async fn test_launch_failure_has_nothing_to_close() {
        let (launcher, counters) = FakeLauncher::new(FakeBehavior::FailLaunch);
        let engine = engine(launcher, Duration::from_secs(5), 1);

        assert!(engine.render("<html></html>").await.is_err());
        assert_eq!(counters.launches(), 0);
        assert_eq!(counters.closes(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_browsers_are_capped() {
        let (launcher, counters) =
            FakeLauncher::new(FakeBehavior::Slow(Duration::from_millis(20)));
        let engine = Arc::new(engine(launcher, Duration::from_secs(5), 2));

        let tasks: Vec<_> = (0..6)
            .map(|_| {
                let engine = engine.clone();
                tokio::spawn(async move { engine.render("<html></html>").await })
            })
            .collect();

        for task in tasks {
            assert!(task.await.unwrap().is_ok());
        }

        assert_eq!(counters.launches(), 6);
        assert_eq!(counters.closes(), 6);
        assert!(counters.max_live() <= 2);
    }

    #[test]
    fn test_zero_limit_still_allows_one() {
        let (launcher, _) = FakeLauncher::new(FakeBehavior::Succeed);
        let engine = engine(launcher, Duration::from_secs(1), 0);
        assert_eq!(engine.permits.available_permits(), 1);
    }
}
