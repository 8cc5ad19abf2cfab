use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use simdomain::format::Report;

/// Render `report` as text lines, or as one JSON document when `json` is set.
pub fn render(report: &Report, json: bool) -> Result<Vec<String>> {
    if json {
        Ok(vec![report.to_json()?])
    } else {
        Ok(report.lines())
    }
}

pub fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Write to `save` when given, stdout otherwise.
pub fn emit(lines: &[String], save: Option<&Path>) -> Result<()> {
    match save {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("unable to create output file {}", path.display()))?;
            write_lines(&mut BufWriter::new(file), lines)
                .with_context(|| format!("unable to write output file {}", path.display()))?;
            info!("wrote {} line(s) to {}", lines.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            write_lines(&mut stdout.lock(), lines)
                .context("unable to write to stdout")?;
        }
    }

    Ok(())
}
