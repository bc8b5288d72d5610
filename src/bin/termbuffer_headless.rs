//! termbuffer headless runner
//!
//! Feeds a recorded output stream (file or stdin) through the terminal and
//! prints the resulting screen as text or as a JSON snapshot.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use termbuffer::{Config, ScreenBuffer, Snapshot, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CLI arguments for the headless runner
#[derive(Parser, Debug, Clone)]
#[command(name = "termbuffer-headless")]
#[command(version)]
#[command(about = "Render a terminal output stream without a display", long_about = None)]
struct CliArgs {
    /// Input file (stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Path to a JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Columns (overrides the config file)
    #[arg(long, value_name = "COLS")]
    cols: Option<usize>,

    /// Rows (overrides the config file)
    #[arg(long, value_name = "ROWS")]
    rows: Option<usize>,

    /// Print a JSON snapshot instead of text
    #[arg(short, long)]
    json: bool,

    /// Mark the cursor position and dirty lines in text output
    #[arg(long)]
    locate_cursor: bool,

    /// Include scrollback in the output
    #[arg(long)]
    scrollback: bool,

    /// Feed the input in chunks of this many bytes
    #[arg(long, value_name = "BYTES")]
    chunk_size: Option<usize>,
}

fn load_config(args: &CliArgs) -> Result<Config, termbuffer::ConfigError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    config.validate()?;
    Ok(config)
}

fn read_input(path: Option<&PathBuf>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path),
        None => {
            let mut data = Vec::new();
            io::stdin().read_to_end(&mut data)?;
            Ok(data)
        }
    }
}

/// Scrollback rows from `dump(true)`, indented past the marker columns of
/// `render_text` when the cursor is located
fn render_scrollback(buffer: &ScreenBuffer, locate_cursor: bool) -> String {
    let prefix = if locate_cursor { "  " } else { "" };
    buffer
        .dump(true)
        .iter()
        .take(buffer.scrollback().len())
        .map(|line| format!("{prefix}{}", line.text()).trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = CliArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let input = match read_input(args.input.as_ref()) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(bytes = input.len(), cols = config.cols, rows = config.rows, "feeding input");

    let mut term = Terminal::with_config(&config);
    match args.chunk_size.filter(|&size| size > 0) {
        Some(size) => input.chunks(size).for_each(|chunk| term.feed(chunk)),
        None => term.feed(&input),
    }
    let buffer = term.buffer();

    if args.json {
        let snapshot = Snapshot::from_buffer(buffer, args.scrollback);
        match snapshot.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing snapshot: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let cursor = buffer.cursor();
    println!("Terminal State ({}x{}):", buffer.width(), buffer.height());
    println!("Cursor: ({}, {})", cursor.y, cursor.x);
    println!("---");
    if args.scrollback && !buffer.scrollback().is_empty() {
        println!("{}", render_scrollback(buffer, args.locate_cursor));
    }
    println!("{}", buffer.render_text(args.locate_cursor));
    println!("---");

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrollback_aligns_with_markers() {
        let mut term = Terminal::new(10, 2);
        term.feed(b"old\nab\ncd");
        let buffer = term.buffer();

        assert_eq!(render_scrollback(buffer, false), "old");
        assert_eq!(render_scrollback(buffer, true), "  old");

        let screen = buffer.render_text(true);
        let rows: Vec<&str> = screen.lines().collect();
        assert_eq!(rows[1], "* ab");
        assert_eq!(rows[1].find('a'), render_scrollback(buffer, true).find('o'));
    }

    #[test]
    fn test_cli_overrides_config() {
        let args = CliArgs::try_parse_from(["termbuffer-headless", "--cols", "40", "--rows", "10"])
            .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!((config.cols, config.rows), (40, 10));
        assert!(args.input.is_none());
    }

    #[test]
    fn test_cli_rejects_zero_size() {
        let args = CliArgs::try_parse_from(["termbuffer-headless", "--cols", "0"]).unwrap();
        assert!(load_config(&args).is_err());
    }
}
