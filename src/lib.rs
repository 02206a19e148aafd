pub mod cli;
pub mod data;
pub mod document;
pub mod infer;
pub mod io_utils;
pub mod table;
pub mod tokenizer;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use log::{LevelFilter, info};

use crate::{
    cli::{Cli, Commands, NormalizeArgs, ProbeArgs},
    infer::{InferenceOptions, ProfileReport, generate_field_names},
    tokenizer::fix_column_count,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("csv_sift", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Probe(args) => handle_probe(&args),
        Commands::Normalize(args) => handle_normalize(&args),
    }
}

fn handle_probe(args: &ProbeArgs) -> Result<()> {
    let options = InferenceOptions {
        null_threshold_pct: args.null_threshold,
        sniff_row_limit: args.sniff_rows,
        null_gate: args.null_gate.into(),
    };
    options.validate()?;

    info!("Probing '{}'", args.input.display());
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let source = io_utils::open_line_source(&args.input, encoding)?;
    let rows = document::parse_document(source)
        .with_context(|| format!("Parsing {:?}", args.input))?;

    let has_header = !args.no_header && !rows.is_empty();
    let (profiles, _decoded) = infer::infer_column_types(has_header, &rows, &options)
        .with_context(|| format!("Inferring column types for {:?}", args.input))?;

    if profiles.is_empty() {
        println!("No columns inferred.");
        return Ok(());
    }

    let names = if has_header {
        rows[0].clone()
    } else {
        generate_field_names(profiles.len())
    };
    let report = ProfileReport::from_parts(&names, &profiles);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_profiles(&report);
    }

    if let Some(path) = &args.meta {
        report
            .save(path)
            .with_context(|| format!("Writing profile report to {path:?}"))?;
        info!("Profile report written to {path:?}");
    }

    let summary = profiles.iter().map(|p| p.datatype.as_str()).join(", ");
    info!(
        "Inferred {} column(s) over {} data row(s): {}",
        profiles.len(),
        rows.len().saturating_sub(usize::from(has_header)),
        summary
    );
    Ok(())
}

fn print_profiles(report: &ProfileReport) {
    let headers = vec![
        "#".to_string(),
        "name".to_string(),
        "type".to_string(),
        "max_width".to_string(),
        "nulls".to_string(),
    ];
    let rows: Vec<Vec<String>> = report
        .columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            vec![
                (idx + 1).to_string(),
                column.name.clone(),
                column.datatype.to_string(),
                column.max_width.to_string(),
                column.null_count.to_string(),
            ]
        })
        .collect();
    table::print_table(&headers, &rows);
}

fn handle_normalize(args: &NormalizeArgs) -> Result<()> {
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    let source = io_utils::open_line_source(&args.input, encoding)?;
    let rows = document::parse_document(source)
        .with_context(|| format!("Parsing {:?}", args.input))?;

    let target_width = args
        .width
        .or_else(|| rows.first().map(Vec::len))
        .unwrap_or(0);

    let mut writer = io_utils::open_csv_writer(args.output.as_deref())?;
    let mut written = 0usize;
    for row in rows {
        let fixed = fix_column_count(target_width, row);
        writer
            .write_record(fixed.iter())
            .with_context(|| format!("Writing output row {}", written + 1))?;
        written += 1;
    }
    writer.flush().context("Flushing output writer")?;

    let destination = args
        .output
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "stdout".to_string());
    info!(
        "Normalized {} row(s) to {} column(s) -> {}",
        written, target_width, destination
    );
    Ok(())
}
