//! Launching an external viewer on a document

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{Error, LaunchFailure, Result};
use crate::text;

/// Exit status a shell reports for a command it could not find
pub const STATUS_NOT_FOUND: i32 = 127;

/// Build the argument vector for opening `doc`
///
/// The result is `[viewer, extra_1, .., extra_n, doc]`; `extra_args` is split
/// on whitespace, with no empty tokens.
pub fn build_argv(
    viewer: impl AsRef<OsStr>,
    extra_args: Option<&str>,
    doc: &Path,
) -> Vec<OsString> {
    let extra = extra_args.unwrap_or_default();
    let mut argv = Vec::with_capacity(2 + text::split_args(extra).count());
    argv.push(viewer.as_ref().to_os_string());
    argv.extend(text::split_args(extra).map(OsString::from));
    argv.push(doc.as_os_str().to_os_string());
    argv
}

/// Run `argv[0]` with the rest as arguments and wait for it
///
/// Succeeds iff the child exits normally with a status other than 127.
///
/// # Errors
/// Returns `Error::Launch` if:
/// - `argv` is empty
/// - The process cannot be spawned
/// - The process is terminated by a signal
/// - The process exits with status 127
pub fn launch(argv: &[OsString]) -> Result<()> {
    let Some((program, args)) = argv.split_first() else {
        return Err(Error::launch("", LaunchFailure::EmptyCommand));
    };
    let name = program.to_string_lossy().into_owned();

    debug!(program = %name, args = ?args, "launching viewer");
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| Error::launch(name.clone(), LaunchFailure::Spawn(e)))?;

    match status.code() {
        None => Err(Error::launch(name, LaunchFailure::Signaled)),
        Some(STATUS_NOT_FOUND) => Err(Error::launch(name, LaunchFailure::CommandNotFound)),
        Some(code) => {
            info!(program = %name, code, "viewer exited");
            Ok(())
        },
    }
}

/// Configured viewer program and its extra arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    program:    PathBuf,
    extra_args: Option<String>,
}

impl Viewer {
    /// Create a viewer; blank extra arguments count as none
    pub fn new(program: impl Into<PathBuf>, extra_args: Option<String>) -> Self {
        let extra_args = extra_args.filter(|a| !a.trim().is_empty());
        Self { program: program.into(), extra_args }
    }

    /// Viewer program
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Extra arguments, if any
    #[must_use]
    pub fn extra_args(&self) -> Option<&str> {
        self.extra_args.as_deref()
    }

    /// Argument vector for opening `doc`
    #[must_use]
    pub fn argv(&self, doc: &Path) -> Vec<OsString> {
        build_argv(&self.program, self.extra_args(), doc)
    }

    /// Open `doc` and wait for the viewer to exit
    ///
    /// # Errors
    /// See [`launch`].
    pub fn open(&self, doc: &Path) -> Result<()> {
        launch(&self.argv(doc))
    }
}
