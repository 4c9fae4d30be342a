use anyhow::{Context, Result, anyhow};
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use log::debug;
use std::io::Write;
use std::time::Duration;

use crate::app_config::RenderConfig;

// @module: Headless-browser session for HTML to PDF

// A4 paper size in inches, as expected by the browser print call
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;

/// A headless-browser session shared by every render call in a batch.
///
/// One browser process is started at batch start and shut down when the
/// session is dropped at batch end, amortizing the startup cost across
/// documents. Calls are issued one at a time; the session is not safe for
/// concurrent renders and nothing in the pipeline attempts them.
pub struct RenderSession {
    browser: Browser,
    config: RenderConfig,
}

impl RenderSession {
    /// Launch the browser and keep it for the lifetime of the session.
    pub fn start(config: &RenderConfig) -> Result<Self> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| anyhow!("Failed to build browser launch options: {}", e))?;

        let browser = Browser::new(options)
            .context("Failed to launch headless browser")?;

        Ok(RenderSession {
            browser,
            config: config.clone(),
        })
    }

    /// Render an HTML string to PDF bytes.
    ///
    /// The HTML is written to a uniquely named temporary file and served over
    /// a `file://` URL; the file is removed when the handle drops, on success
    /// and failure alike. After navigation completes the call sleeps the
    /// configured settle delay so the deferred math typesetting script can
    /// finish; typesetting exposes no completion signal the browser protocol
    /// could wait on.
    pub fn render_html(&self, html: &str) -> Result<Vec<u8>> {
        let mut temp_file = tempfile::Builder::new()
            .prefix("dualdoc_")
            .suffix(".html")
            .tempfile()
            .context("Failed to create temporary HTML file")?;

        temp_file.write_all(html.as_bytes())?;
        temp_file.flush()?;

        let url = format!("file://{}", temp_file.path().display());
        debug!("Rendering {}", url);

        let tab = self.browser.new_tab()
            .context("Failed to open browser tab")?;
        tab.set_default_timeout(Duration::from_secs(self.config.timeout_secs));

        let result = self.print_tab(&tab, &url);

        // Best-effort close; the browser reaps the tab on drop anyway
        let _ = tab.close(true);

        result
    }

    fn print_tab(&self, tab: &headless_chrome::Tab, url: &str) -> Result<Vec<u8>> {
        tab.navigate_to(url)
            .with_context(|| format!("Failed to navigate to {}", url))?;
        tab.wait_until_navigated()
            .context("Navigation did not complete")?;

        std::thread::sleep(Duration::from_millis(self.config.settle_delay_ms));

        let margin = self.config.margin_inches;
        let pdf_options = PrintToPdfOptions {
            print_background: Some(true),
            paper_width: Some(A4_WIDTH_IN),
            paper_height: Some(A4_HEIGHT_IN),
            margin_top: Some(margin),
            margin_bottom: Some(margin),
            margin_left: Some(margin),
            margin_right: Some(margin),
            ..Default::default()
        };

        tab.print_to_pdf(Some(pdf_options))
            .context("Browser print-to-PDF call failed")
    }
}
