//! compile_sheet.rs
//!
//! Compile one workbook into its data-table model and print the result as
//! pretty JSON: resolved column schemas and the interned string literal
//! table. Rows whose id-column cell starts with `#` count as comments.
//!
//! Usage:
//!   compile_sheet <FILE.xlsx> <NAME_ROW> <TYPE_ROW> <CONTENT_START_ROW> <ID_COLUMN> \
//!       [--default-row N] [--comment-row N]

use anyhow::{bail, Context, Result};
use serde_json::json;
use sheetc::{marker_comment_predicate, DataTableModel, LayoutSpec, ProcessorRegistry};
use std::env;
use std::process::exit;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 6 {
        bail!(
            "Usage: {} <FILE.xlsx> <NAME_ROW> <TYPE_ROW> <CONTENT_START_ROW> <ID_COLUMN> \
             [--default-row N] [--comment-row N]",
            args[0]
        );
    }

    let file = &args[1];
    let name_row = parse_index(&args[2], "NAME_ROW")?;
    let type_row = parse_index(&args[3], "TYPE_ROW")?;
    let content_start_row = parse_index(&args[4], "CONTENT_START_ROW")?;
    let id_column = parse_index(&args[5], "ID_COLUMN")?;

    let mut default_value_row = None;
    let mut comment_row = None;
    let mut rest = args[6..].iter();
    while let Some(flag) = rest.next() {
        let value = rest
            .next()
            .with_context(|| format!("flag {} requires a value", flag))?;
        match flag.as_str() {
            "--default-row" => default_value_row = Some(parse_index(value, "--default-row")?),
            "--comment-row" => comment_row = Some(parse_index(value, "--comment-row")?),
            other => bail!("unknown flag: {}", other),
        }
    }

    let layout = LayoutSpec {
        name_row,
        type_row,
        default_value_row,
        comment_row,
        content_start_row,
        id_column,
    };

    let registry = ProcessorRegistry::with_builtins();
    let model = DataTableModel::load(
        file,
        layout,
        &registry,
        marker_comment_predicate(id_column, '#'),
    )
    .with_context(|| format!("compiling {}", file))?;

    info!(
        columns = model.column_count(),
        literals = model.strings().len(),
        "compiled {}",
        file
    );

    let out = json!({
        "layout": model.layout(),
        "columns": model.columns(),
        "strings": model.strings(),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);

    Ok(())
}

fn parse_index(raw: &str, what: &str) -> Result<usize> {
    raw.parse::<usize>()
        .with_context(|| format!("{} must be a non-negative integer, got `{}`", what, raw))
}
