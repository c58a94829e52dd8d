#![deny(
    missing_debug_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
//! `mdoc` - Find, count, list and open documents from the command line.

mod render;

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, ArgGroup, Parser};
use clap_cargo::style::CLAP_STYLING;
use mdoc::allocator::TrackingAllocator;
use mdoc::types::{EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE, MAX_DEPTH};
use mdoc::{Config, Error, Result, ResultList, SearchEngine, SearchPattern, config};
use render::Painter;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static ALLOCATOR: TrackingAllocator = TrackingAllocator::new();

/// Environment variable holding a `tracing` filter directive
const LOG_ENV: &str = "MDOC_LOG";

/// CLI arguments for `mdoc`
#[derive(Parser, Debug)]
#[command(author, version, about, styles = CLAP_STYLING)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["count", "list", "open", "details", "generate"])
))]
struct Cli {
    /// Count matching documents
    #[arg(short, long)]
    count: bool,

    /// List matching documents
    #[arg(short, long)]
    list: bool,

    /// Open the matching document with the configured viewer
    #[arg(short, long)]
    open: bool,

    /// Show path, permissions, size and modification time of matches
    #[arg(short, long)]
    details: bool,

    /// Generate the configuration file interactively
    #[arg(short, long)]
    generate: bool,

    /// Match every document
    #[arg(short, long)]
    all: bool,

    /// Sort results alphabetically
    #[arg(short, long)]
    sort: bool,

    /// Reverse the result order (after sorting)
    #[arg(short, long)]
    reverse: bool,

    /// Match names case-insensitively
    #[arg(short, long)]
    ignore_case: bool,

    /// Allow opening several documents, one after another
    #[arg(short, long)]
    numerous: bool,

    /// Only look at the top level of each documents directory
    #[arg(short = 'R', long)]
    no_recursive: bool,

    /// Disable colored output
    #[arg(short = 'C', long)]
    no_color: bool,

    /// Configuration file [default: $MDOC_CONFIG or ~/.config/mdoc]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Deepest directory level searched
    #[arg(long, value_name = "N", default_value_t = MAX_DEPTH)]
    max_depth: usize,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Substring of the document names to look for
    #[arg(required_unless_present_any = ["all", "generate"], conflicts_with = "all")]
    pattern: Option<String>,
}

impl Cli {
    fn search_pattern(&self) -> SearchPattern {
        let pattern = match &self.pattern {
            Some(needle) if !self.all => SearchPattern::new(needle.as_str()),
            _ => SearchPattern::all(),
        };
        pattern.ignore_case(self.ignore_case).recursive(!self.no_recursive)
    }
}

/// Install the stderr subscriber; `MDOC_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Open matches one by one, stopping at the first failure
///
/// `[OPENING]` is reported only once the viewer has run successfully.
fn open_documents(
    config: &Config,
    docs: &ResultList,
    numerous: bool,
    painter: Painter,
    out: &mut impl Write,
) -> Result<()> {
    if docs.is_empty() {
        painter.not_found(out)?;
        return Ok(());
    }
    if docs.count() > 1 && !numerous {
        return Err(Error::TooManyDocuments(docs.count()));
    }

    for doc in docs {
        config.viewer.open(&doc.path)?;
        painter.opening(out, doc)?;
        out.flush()?;
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let config_path = config::resolve_path(cli.config.as_deref())?;

    if cli.generate {
        Config::generate(&config_path, io::stdin().lock(), io::stdout())?;
        return Ok(());
    }

    let config = Config::load(&config_path)?;
    let engine = SearchEngine::new().max_depth(cli.max_depth).capture_details(cli.details);

    let mut docs = engine.search_all(&config.dirs, &cli.search_pattern())?;
    if cli.sort {
        docs.sort_by_name();
    }
    if cli.reverse {
        docs.reverse();
    }

    let painter = Painter::new(!cli.no_color && io::stdout().is_terminal());
    let mut out = io::stdout().lock();

    if cli.count {
        painter.count(&mut out, docs.count())?;
    } else if cli.list {
        painter.list(&mut out, &docs)?;
    } else if cli.details {
        painter.details(&mut out, &docs)?;
    } else if cli.open {
        open_documents(&config, &docs, cli.numerous, painter, &mut out)?;
    }
    Ok(())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            let _ = e.print();
            process::exit(EXIT_USAGE);
        },
    };
    init_logging(cli.verbose);

    let code = match run(&cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("{}", e.user_message());
            EXIT_FAILURE
        },
    };

    debug!(peak_bytes = ALLOCATOR.peak(), "exiting");
    process::exit(code);
}
