use crate::browser::config::{ConnectionOptions, LaunchOptions};
use crate::dom::{self, DomTree};
use crate::error::{Result, SyntaxError};
use crate::syntax::{self, SnapshotResolver, SyntaxMessage};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session hosting the page whose tree gets reduced
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// Tab the page is loaded into
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Pages can take a while to settle before extraction; keep the browser alive meanwhile
        launch_opts.idle_browser_timeout = Duration::from_secs(10 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        let browser = Browser::new(launch_opts).map_err(|e| SyntaxError::LaunchFailed(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| SyntaxError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        log::debug!("Launched browser (headless: {})", options.headless);
        Ok(Self { browser, tab })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect_with_timeout(options.ws_url, Duration::from_millis(options.timeout))
            .map_err(|e| SyntaxError::ConnectionFailed(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| SyntaxError::ConnectionFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, tab })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// The tab pages are loaded into
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate to a URL
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| SyntaxError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab
            .wait_until_navigated()
            .map_err(|e| SyntaxError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Extract the styled DOM tree of the current page
    pub fn extract_dom(&self) -> Result<DomTree> {
        dom::extract_dom(&self.tab)
    }

    /// Extract the current page and reduce it, reporting failures as a message
    pub fn llm_syntax(&self) -> SyntaxMessage {
        match self.extract_dom() {
            Ok(mut tree) => syntax::run(&mut tree, &SnapshotResolver),
            Err(e) => {
                log::warn!("Failed to extract DOM: {}", e);
                SyntaxMessage::HtmlParsingError((&e).into())
            }
        }
    }

    /// Close the browser
    pub fn close(&self) -> Result<()> {
        // headless_chrome closes the process when Browser is dropped; closing the tab is enough here
        self.tab
            .close(false)
            .map_err(|e| SyntaxError::EvaluationFailed(format!("Failed to close tab: {}", e)))?;
        Ok(())
    }
}
