//! User configuration: document roots and viewer
//!
//! The file is line oriented:
//! 1. document root directories, separated by whitespace
//! 2. viewer program
//! 3. extra viewer arguments (optional)

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::viewer::Viewer;

/// Environment variable overriding the configuration path
pub const CONFIG_ENV: &str = "MDOC_CONFIG";

/// Configuration path relative to the home directory
pub const CONFIG_RELATIVE_PATH: &str = ".config/mdoc";

/// Loaded configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Document roots, searched in this order
    pub dirs:   Vec<PathBuf>,
    /// Program used to open documents
    pub viewer: Viewer,
}

/// Pick the configuration path from an explicit override, then `MDOC_CONFIG`,
/// then `$HOME/.config/mdoc`
///
/// # Errors
/// Returns a config error if no candidate is available.
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_path_from(explicit, env::var_os(CONFIG_ENV), env::var_os("HOME"))
}

fn resolve_path_from(
    explicit: Option<&Path>,
    from_env: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = from_env.filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    home.filter(|h| !h.is_empty())
        .map(|h| PathBuf::from(h).join(CONFIG_RELATIVE_PATH))
        .ok_or_else(|| Error::config("HOME is not set, can't locate the configuration file"))
}

impl Config {
    /// Parse configuration text
    ///
    /// # Errors
    /// Returns a config error if the directory or viewer line is missing.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut lines = contents.lines();

        let dirs: Vec<PathBuf> =
            lines.next().unwrap_or_default().split_whitespace().map(PathBuf::from).collect();
        if dirs.is_empty() {
            return Err(Error::config("no documents directory configured"));
        }

        let program = lines.next().map(str::trim).unwrap_or_default();
        if program.is_empty() {
            return Err(Error::config("no viewer configured"));
        }

        let extra_args = lines.next().map(|l| l.trim().to_owned());
        Ok(Self { dirs, viewer: Viewer::new(program, extra_args) })
    }

    /// Read and parse the configuration file at `path`
    ///
    /// # Errors
    /// Returns a config error if the file is missing or malformed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path).map_err(|e| {
            Error::config(&format!("can't read configuration '{}': {e}", path.display()))
        })?;
        Self::parse(&contents)
    }

    /// Render the configuration in file format
    #[must_use]
    pub fn to_file_contents(&self) -> String {
        let dirs: Vec<_> = self.dirs.iter().map(|d| d.display().to_string()).collect();
        let mut out = format!("{}\n{}\n", dirs.join(" "), self.viewer.program().display());
        if let Some(extra) = self.viewer.extra_args() {
            out.push_str(extra);
            out.push('\n');
        }
        out
    }

    /// Write the configuration to `path`, creating parent directories
    ///
    /// # Errors
    /// Returns error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_file_contents())?;
        info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Ask for each setting on `input`, then save to `path`
    ///
    /// # Errors
    /// Returns error if input ends early, an answer is invalid, or the file
    /// cannot be written.
    pub fn generate(path: &Path, mut input: impl BufRead, mut output: impl Write) -> Result<Self> {
        let dirs = prompt(
            &mut input,
            &mut output,
            "Please enter your documents directories absolute paths (separated by spaces): ",
        )?
        .ok_or_else(incomplete)?;
        let viewer = prompt(&mut input, &mut output, "Please enter your viewer's absolute path: ")?
            .ok_or_else(incomplete)?;
        let extra = prompt(
            &mut input,
            &mut output,
            "Please enter additional viewer arguments (leave empty for none): ",
        )?
        .unwrap_or_default();

        let config = Self::parse(&format!("{dirs}\n{viewer}\n{extra}\n"))?;
        config.save(path)?;
        writeln!(output, "\nYour configurations were generated successfully.")?;
        Ok(config)
    }
}

fn incomplete() -> Error {
    Error::config("input ended before configuration was complete")
}

/// Print `question` and read one trimmed answer line, `None` at end of input
fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    question: &str,
) -> Result<Option<String>> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}
