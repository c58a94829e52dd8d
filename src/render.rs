//! Terminal output for search results

use std::io::{self, Write};

use chrono::{DateTime, Local};
use clap::builder::styling::{AnsiColor, Style};
use mdoc::{DocumentRecord, ResultList};

const BRACKET: Style = AnsiColor::Blue.on_default();
const TAG: Style = AnsiColor::Green.on_default();
const PAYLOAD: Style = AnsiColor::Red.on_default();

/// Writes tagged result lines, optionally colored
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    /// One `[TAG] payload` line
    fn line(self, out: &mut impl Write, tag: &str, payload: &str) -> io::Result<()> {
        if self.color {
            writeln!(
                out,
                "{}[{}{}{}{}]{}{} {payload}{}",
                BRACKET.render(),
                BRACKET.render_reset(),
                TAG.render(),
                tag,
                TAG.render_reset(),
                BRACKET.render(),
                PAYLOAD.render(),
                PAYLOAD.render_reset(),
            )
        } else {
            writeln!(out, "[{tag}] {payload}")
        }
    }

    pub fn list(self, out: &mut impl Write, docs: &ResultList) -> io::Result<()> {
        for doc in docs {
            self.line(out, "+", &doc.name)?;
        }
        Ok(())
    }

    pub fn count(self, out: &mut impl Write, count: usize) -> io::Result<()> {
        self.line(out, "COUNTED", &format!("{count} Documents"))
    }

    pub fn opening(self, out: &mut impl Write, doc: &DocumentRecord) -> io::Result<()> {
        self.line(out, "OPENING", &doc.name)
    }

    pub fn not_found(self, out: &mut impl Write) -> io::Result<()> {
        self.line(out, "NOT FOUND", "No document matched")
    }

    /// Name line followed by indented metadata
    pub fn details(self, out: &mut impl Write, docs: &ResultList) -> io::Result<()> {
        for doc in docs {
            self.line(out, "+", &doc.name)?;
            writeln!(out, "    path:     {}", doc.path.display())?;
            if let Some(info) = doc.info {
                writeln!(out, "    mode:     {:04o}", info.permissions())?;
                writeln!(out, "    size:     {} bytes", info.size)?;
                match info.modified {
                    Some(time) => {
                        let time: DateTime<Local> = time.into();
                        writeln!(out, "    modified: {}", time.format("%Y-%m-%d %H:%M:%S"))?;
                    },
                    None => writeln!(out, "    modified: unknown")?,
                }
            }
        }
        Ok(())
    }
}
