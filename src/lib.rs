//! `mdoc` - Find, count, list and open documents by filename.
//!
//! Documents live under one or more configured root directories. A search
//! walks them depth-first, collecting every regular file whose name contains a
//! pattern, and hands back a [`ResultList`] the caller can sort, reverse,
//! count or open with the configured [`Viewer`].
//!
//! ```no_run
//! use mdoc::{SearchEngine, SearchPattern};
//!
//! let pattern = SearchPattern::new("report").ignore_case(true);
//! let mut found = SearchEngine::new().search_all(&["/home/me/docs"], &pattern)?;
//! found.sort_by_name();
//! for doc in &found {
//!     println!("{}", doc.path.display());
//! }
//! # Ok::<(), mdoc::Error>(())
//! ```

#![deny(
    missing_debug_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]

pub mod allocator;
pub mod config;
pub mod crawler;
pub mod error;
pub mod results;
pub mod search;
pub mod source;
pub mod text;
pub mod types;
pub mod viewer;

pub use config::Config;
pub use error::{Error, Result};
pub use results::ResultList;
pub use search::SearchEngine;
pub use source::{OsSource, Source};
pub use types::{DocumentInfo, DocumentRecord, SearchPattern};
pub use viewer::Viewer;
