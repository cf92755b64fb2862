//! llm-syntax command line
//!
//! Loads a page in Chrome (or reads a previously captured tree) and prints its
//! reduced markup on stdout.

use anyhow::{Context, bail};
use clap::Parser;
use llm_syntax::{BrowserSession, ConnectionOptions, DomTree, LaunchOptions, SnapshotResolver, SyntaxMessage};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "llm-syntax")]
#[command(version)]
#[command(about = "Reduce a rendered web page into compact markup for language models", long_about = None)]
struct Cli {
    /// URL of the page to load
    #[arg(value_name = "URL", required_unless_present = "snapshot")]
    url: Option<String>,

    /// Read a captured styled tree (JSON) instead of loading a page
    #[arg(long, value_name = "FILE", conflicts_with = "url")]
    snapshot: Option<PathBuf>,

    /// Write the captured styled tree (JSON) to this file
    #[arg(long, value_name = "FILE")]
    save_snapshot: Option<PathBuf>,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// WebSocket endpoint URL for remote browser connection
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Time to let the page settle after navigation, in milliseconds
    #[arg(long, default_value = "500")]
    settle_ms: u64,

    /// Print the transport message as JSON instead of the bare markup
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut tree = match (&cli.snapshot, &cli.url) {
        (Some(path), _) => {
            DomTree::load(path).with_context(|| format!("Failed to load snapshot {}", path.display()))?
        }
        (None, Some(url)) => capture(&cli, url)?,
        (None, None) => bail!("Either a URL or --snapshot is required"),
    };
    log::info!("Styled tree has {} elements", tree.count_elements());

    if let Some(path) = &cli.save_snapshot {
        tree.save(path)
            .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    }

    let message = llm_syntax::run(&mut tree, &SnapshotResolver);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&message)?);
        return Ok(());
    }

    match message {
        SyntaxMessage::LlmSyntax(markup) => {
            println!("{}", markup);
            Ok(())
        }
        SyntaxMessage::HtmlParsingError(report) => bail!("{}: {}", report.name, report.message),
    }
}

fn capture(cli: &Cli, url: &str) -> anyhow::Result<DomTree> {
    let session = match &cli.ws_endpoint {
        Some(endpoint) => {
            log::info!("Connecting to browser at {}", endpoint);
            BrowserSession::connect(ConnectionOptions::new(endpoint.clone()))?
        }
        None => {
            let mut options = LaunchOptions::new().headless(!cli.headed);
            if let Some(path) = &cli.chrome_path {
                options = options.chrome_path(path.clone());
            }
            BrowserSession::launch(options)?
        }
    };

    session.navigate(url)?;
    session.wait_for_navigation()?;
    std::thread::sleep(Duration::from_millis(cli.settle_ms));

    let tree = session.extract_dom().context("Failed to capture styled tree")?;
    session.close()?;
    Ok(tree)
}
