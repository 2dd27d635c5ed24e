//! # Row Layout Preview
//!
//! Prepares a JSON list of line items, lays them out on a recording surface
//! and prints the totals and draw operations.
//!
//! ## Usage
//! ```bash
//! # Text report, default layout
//! cargo run -p folio-layout --bin folio-preview -- --items items.json
//!
//! # Custom layout, table starting lower on the page, JSON output
//! cargo run -p folio-layout --bin folio-preview -- \
//!     --items items.json --config layout.toml --y 80 --json
//! ```
//!
//! ## Input
//! ```json
//! [
//!   { "name": "Widget", "unit_cost": "10.00", "quantity": "3" },
//!   { "name": "Consulting", "unit_cost": "50", "quantity": "2",
//!     "discount": { "percent": "15" }, "tax": { "percent": "20" } }
//! ]
//! ```

use std::env;
use std::path::PathBuf;

use folio_core::PreparedLineItem;
use folio_layout::{
    read_items, Cursor, DrawOp, LayoutConfig, LayoutResult, RecordingSurface, RowLayout,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const DEFAULT_START_Y: f64 = 50.0;

#[derive(Serialize)]
struct Report<'a> {
    items: &'a [PreparedLineItem],
    end_y: f64,
    ops: &'a [DrawOp],
}

#[derive(Debug, PartialEq)]
struct Options {
    items_path: PathBuf,
    config_path: Option<PathBuf>,
    start_y: f64,
    json: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Options),
    Help,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print_help();
            return;
        }
        Err(message) => {
            eprintln!("{}", message);
            print_help();
            std::process::exit(2);
        }
    };

    init_tracing();

    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Parses the command line. `args[0]` is the program name.
fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut items_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut start_y = DEFAULT_START_Y;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--items" | "-i" => {
                items_path = Some(PathBuf::from(value_for(args, i, flag)?));
                i += 1;
            }
            "--config" | "-c" => {
                config_path = Some(PathBuf::from(value_for(args, i, flag)?));
                i += 1;
            }
            "--y" => {
                let value = value_for(args, i, flag)?;
                start_y = value
                    .parse()
                    .map_err(|_| format!("Invalid value for --y: '{}'", value))?;
                i += 1;
            }
            "--json" => json = true,
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(format!("Unknown argument: {}", other)),
        }
        i += 1;
    }

    let items_path = items_path.ok_or_else(|| "Missing required --items <PATH>".to_string())?;

    Ok(Command::Run(Options {
        items_path,
        config_path,
        start_y,
        json,
    }))
}

/// The argument following the flag at `i`.
fn value_for<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn run(options: &Options) -> LayoutResult<()> {
    let config = LayoutConfig::load(options.config_path.clone())?;
    let surface_style = config.text.base_style();
    let layout = RowLayout::new(config)?;

    let items = read_items(&options.items_path)?;

    let mut surface = RecordingSurface::new(surface_style);
    let end = layout.render_rows(&items, Cursor::at(options.start_y), &mut surface);

    if options.json {
        let report = Report {
            items: &items,
            end_y: end.y(),
            ops: surface.ops(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Folio Row Preview");
    println!("=================");
    for (index, item) in items.iter().enumerate() {
        let totals = item.totals();
        println!(
            "{:>3}. {:<30} subtotal {:>12}  discount {:>10}  tax {:>10}  total {:>12}",
            index + 1,
            item.name(),
            totals.subtotal,
            totals.discount,
            totals.tax,
            totals.grand_total
        );
    }
    println!();
    println!("Draw operations ({}):", surface.ops().len());
    for op in surface.ops() {
        println!("  {}", serde_json::to_string(op)?);
    }
    println!();
    println!("Table ends at y = {}", end.y());

    Ok(())
}

fn print_help() {
    println!("Folio Row Layout Preview");
    println!();
    println!("Usage: folio-preview --items <PATH> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -i, --items <PATH>   JSON array of line items (required)");
    println!("  -c, --config <PATH>  Layout TOML file (default: built-in layout)");
    println!("      --y <N>          Top of the first row (default: 50)");
    println!("      --json           Print a JSON report instead of text");
    println!("  -h, --help           Show this help message");
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so `--json` output stays machine-readable.
/// `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,folio=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
