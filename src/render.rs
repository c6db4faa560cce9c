//! External page renderer for JavaScript-heavy sources
//!
//! Some sources only expose their listings through pages that need a real
//! browser to render. That capability lives behind the narrow [`PageRenderer`]
//! seam — "given a URL and options, return HTML text or fail" — so the worker
//! pool and the feed sources never depend on process-spawning details.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Options for one render call
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Page-load timeout passed to the renderer
    pub timeout: Duration,
    /// Show the browser window instead of running headless
    pub show: bool,
    /// Load event to wait for (e.g. "load", "networkidle")
    pub wait: String,
    /// Extra render delay after the wait event, in milliseconds
    pub render_delay_ms: u64,
    /// Browser profile directory
    pub user_data_dir: PathBuf,
    /// File the renderer writes the HTML to
    pub output_file: PathBuf,
    /// Cookie file to load into the browser session
    pub cookie_file: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            show: false,
            wait: "load".to_string(),
            render_delay_ms: 15_000,
            user_data_dir: PathBuf::from("./user_data"),
            output_file: PathBuf::from("./page.html"),
            cookie_file: None,
        }
    }
}

/// Renders a URL to HTML text
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Render the page at `url` and return its HTML
    async fn render(&self, url: &str, options: &RenderOptions) -> Result<String>;

    /// Name of this renderer implementation
    fn name(&self) -> &'static str;
}

/// Renderer that shells out to an external headless-browser fetcher binary
///
/// The binary receives the URL plus `--timeout`/`--wait`/`--render`/
/// `--user-data-dir`/`--output` flags, prints the written file path on
/// stdout, and leaves the HTML in the output file.
///
/// # Examples
///
/// ```no_run
/// use feedrank::render::{CliRenderer, PageRenderer, RenderOptions};
/// use std::path::PathBuf;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Create with explicit path
/// let renderer = CliRenderer::new(PathBuf::from("/usr/local/bin/fetcher"));
///
/// // Or auto-discover from PATH
/// let renderer = CliRenderer::from_path().expect("fetcher not found in PATH");
///
/// let html = renderer.render("https://example.com", &RenderOptions::default()).await?;
/// # Ok(())
/// # }
/// ```
pub struct CliRenderer {
    binary_path: PathBuf,
}

impl CliRenderer {
    /// Create a renderer with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find the `fetcher` binary in PATH
    ///
    /// # Returns
    /// `Some(CliRenderer)` if the binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        which::which("fetcher").ok().map(Self::new)
    }
}

#[async_trait]
impl PageRenderer for CliRenderer {
    async fn render(&self, url: &str, options: &RenderOptions) -> Result<String> {
        let mut command = Command::new(&self.binary_path);
        command
            .arg(url)
            .arg("--timeout")
            .arg(options.timeout.as_secs().to_string())
            .arg("--wait")
            .arg(&options.wait)
            .arg("--render")
            .arg(options.render_delay_ms.to_string())
            .arg("--user-data-dir")
            .arg(&options.user_data_dir)
            .arg("--output")
            .arg(&options.output_file);

        if options.show {
            command.arg("--show");
        }
        if let Some(cookie_file) = &options.cookie_file {
            command.arg("--cookie-file").arg(cookie_file);
        }

        // Give the renderer its own timeout plus headroom for process startup
        let deadline = options.timeout + Duration::from_secs(5);
        let output = tokio::time::timeout(deadline, command.output())
            .await
            .map_err(|_| {
                Error::Render(format!("renderer timed out after {}s", deadline.as_secs()))
            })?
            .map_err(|e| Error::Render(format!("failed to execute renderer: {e}")))?;

        if !output.status.success() {
            return Err(Error::Render(format!(
                "renderer exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let reported = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if reported.is_empty() {
            return Err(Error::Render(
                "renderer did not report an output path".to_string(),
            ));
        }

        Ok(tokio::fs::read_to_string(&options.output_file).await?)
    }

    fn name(&self) -> &'static str {
        "cli-fetcher"
    }
}
