//! Terminal output: JSON views on stdout, styled errors on stderr.

use console::style;
use serde::Serialize;
use std::io::Write;

/// Print a view as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let json = rtscope_core::json::to_json_pretty(&value)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

/// Print an error line on stderr.
pub fn error(message: &str) {
    eprintln!("{} {message}", style("error:").red().bold());
}
