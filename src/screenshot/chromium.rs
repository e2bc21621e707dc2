//! Headless Chromium backend for the screenshot engine.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::handler::viewport::Viewport as ChromeViewport;
use chromiumoxide::page::ScreenshotParams;
use futures_util::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{BrowserLauncher, BrowserSession, Viewport};
use crate::errors::AppError;

/// Upper bound for a graceful browser shutdown before it is killed.
const CLOSE_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves once web fonts and every `<img>` on the page have finished loading.
const SETTLE_SCRIPT: &str = r#"Promise.all([
    document.fonts ? document.fonts.ready : null,
    ...Array.from(document.images).map((img) =>
        img.complete ? null : new Promise((resolve) => { img.onload = img.onerror = resolve; })
    ),
]).then(() => true)"#;

/// Launches one headless Chromium per session, each with its own profile directory.
#[derive(Debug, Clone, Default)]
pub struct ChromiumLauncher {
    chrome_path: Option<PathBuf>,
}

impl ChromiumLauncher {
    pub fn new(chrome_path: Option<PathBuf>) -> Self {
        Self { chrome_path }
    }
}

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
    async fn launch(&self, viewport: Viewport) -> Result<Box<dyn BrowserSession>, AppError> {
        let profile_dir = tempfile::Builder::new()
            .prefix("og-image-chromium-")
            .tempdir()
            .map_err(|e| AppError::Render(format!("Failed to create browser profile: {}", e)))?;

        let mut builder = BrowserConfig::builder()
            .user_data_dir(profile_dir.path())
            .window_size(viewport.width, viewport.height)
            .viewport(ChromeViewport {
                width: viewport.width,
                height: viewport.height,
                device_scale_factor: Some(1.0),
                ..Default::default()
            })
            .no_sandbox()
            .arg("--disable-setuid-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-extensions")
            .arg("--mute-audio")
            .arg("--hide-scrollbars");

        if let Some(ref chrome_path) = self.chrome_path {
            builder = builder.chrome_executable(chrome_path);
        }

        let config = builder
            .build()
            .map_err(|e| AppError::Render(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(config).await?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler error: {}", e);
                }
            }
        });

        Ok(Box::new(ChromiumSession {
            browser: Some(browser),
            handler_task,
            _profile_dir: profile_dir,
        }))
    }
}

/// A running Chromium process.
///
/// Dropping the session without `close` still kills the child process, since
/// `Browser` kills it on drop.
struct ChromiumSession {
    browser: Option<Browser>,
    handler_task: JoinHandle<()>,
    _profile_dir: TempDir,
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    /// Loads the card with `set_content` and captures it.
    ///
    /// There is no network-idle wait: the card is fully inline, so nothing is
    /// fetched after load. `SETTLE_SCRIPT` waits for fonts and the data-URI
    /// images to decode instead.
    async fn capture_png(&mut self, html: &str) -> Result<Vec<u8>, AppError> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| AppError::Render("Browser already closed".to_string()))?;

        let page = browser.new_page("about:blank").await?;

        // Writes the document and waits for its load lifecycle.
        page.set_content(html).await?;

        let settle = EvaluateParams::builder()
            .expression(SETTLE_SCRIPT)
            .await_promise(true)
            .build()
            .map_err(|e| AppError::Render(format!("Invalid settle script: {}", e)))?;
        page.evaluate_expression(settle).await?;

        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();

        Ok(page.screenshot(params).await?)
    }

    async fn close(&mut self) {
        let Some(mut browser) = self.browser.take() else {
            return;
        };

        match tokio::time::timeout(CLOSE_TIMEOUT, browser.close()).await {
            Ok(Ok(_)) => {
                if let Err(e) = browser.wait().await {
                    warn!("Failed to reap browser process: {}", e);
                }
            }
            Ok(Err(e)) => warn!("Failed to close browser: {}", e),
            Err(_) => warn!("Browser did not close within {:?}", CLOSE_TIMEOUT),
        }

        // Kills the process if the graceful close did not finish.
        drop(browser);
        self.handler_task.abort();
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}
