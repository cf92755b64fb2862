//! # llm-syntax
//!
//! Reduce a rendered web page into compact markup a language model can read.
//!
//! Given a document tree whose elements carry their resolved (computed) styles, the
//! library drops what carries no meaning for a reader (scripts, SVG, cookie banners,
//! comments, inline styling, most attributes) and writes a handful of visual
//! properties back as short attributes. A style is only written when it differs from
//! the value last written for the previous element in document order, so runs of
//! identically styled siblings cost nothing.
//!
//! ## Features
//!
//! - **Reduction pipeline**: exclusion filter, comment stripper, style extractor with
//!   color/number normalization, attribute reducer with carry-forward style deltas,
//!   whitespace-normalizing serializer
//! - **Pluggable style resolution**: any host that can answer "computed value of this
//!   property for this element" drives the pipeline
//! - **Browser host**: headless Chrome via the Chrome DevTools Protocol captures a
//!   page's styled tree in one script evaluation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use llm_syntax::{BrowserSession, LaunchOptions};
//!
//! # fn main() -> llm_syntax::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.navigate("https://example.com")?;
//! session.wait_for_navigation()?;
//!
//! match session.llm_syntax().into_result() {
//!     Ok(markup) => println!("{}", markup),
//!     Err(report) => eprintln!("{}: {}", report.name, report.message),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Offline trees
//!
//! ```rust
//! use llm_syntax::{DomTree, ElementNode, SnapshotResolver};
//!
//! let body = ElementNode::new("body").with_child(
//!     ElementNode::new("h1")
//!         .with_attribute("class", "hero")
//!         .with_computed_style("display", "block")
//!         .with_computed_style("color", "rgb(255, 255, 255)")
//!         .with_text("Hello"),
//! );
//! let mut tree = DomTree::new(ElementNode::new("html").with_child(body));
//!
//! let markup = llm_syntax::generate(&mut tree, &SnapshotResolver).unwrap();
//! assert_eq!(markup, r##"<h1 color="#ffffff" display="block">Hello</h1>"##);
//! ```
//!
//! ## Module Overview
//!
//! - [`syntax`]: the reduction pipeline and its style tables
//! - [`dom`]: document tree model, markup writer, snapshot/restore
//! - [`browser`]: Chrome session used as the rendering host
//! - [`error`]: error types, result alias and structured error reports

pub mod browser;
pub mod dom;
pub mod error;
pub mod syntax;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use dom::{DomTree, ElementNode, Node};
pub use error::{ErrorReport, Result, SyntaxError};
pub use syntax::{SnapshotResolver, StyleDelta, StyleKey, StyleResolver, SyntaxMessage, generate, run};
