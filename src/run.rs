use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use topsis_engine::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::run::config_reader::*;
use crate::run::io_common::*;
use crate::run::io_csv::*;
use crate::run::io_excel::*;
use crate::run::io_output::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod io_output;

#[derive(Debug, Snafu)]
pub enum RunError {
    #[snafu(display("File not Found: {path}"))]
    FileNotFound { path: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading file {path} at line {lineno}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: usize,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Worksheet {worksheet} not found in file {path}"))]
    MissingWorksheet { path: String, worksheet: String },
    #[snafu(display("File {path} does not contain any data"))]
    EmptyInput { path: String },
    #[snafu(display("Error reading file {path}"))]
    ReadingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Weights must be numeric values separated by ','. Found: '{token}'"))]
    WeightParse { token: String },
    #[snafu(display("Missing {what}: pass it on the command line or in the configuration file"))]
    MissingArgument { what: String },
    #[snafu(display("{source}"))]
    Topsis { source: TopsisErrors },
    #[snafu(display("Error writing the results to {path}"))]
    WritingCsv { source: csv::Error, path: String },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the output and the reference file {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RunResult<T> = Result<T, RunError>;
pub type BRunResult<T> = Result<T, Box<RunError>>;

/// All the settings of a run, once the command line and the configuration
/// file have been merged.
#[derive(PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub input_path: String,
    pub provider: InputProvider,
    pub excel_worksheet_name: Option<String>,
    pub weights: Vec<f64>,
    pub impacts: Vec<String>,
    pub output_path: String,
    pub summary_path: Option<String>,
    pub reference_path: Option<String>,
    pub rules: TopsisRules,
}

/// Merges the command line with the configuration file, if any.
///
/// Values from the command line take precedence. Paths read from the
/// configuration file are relative to its directory.
pub fn resolve_settings(args: &Args) -> BRunResult<RunSettings> {
    let config = match &args.config {
        Some(p) => Some(read_config(p)?),
        None => None,
    };
    let root: PathBuf = args
        .config
        .as_ref()
        .and_then(|p| Path::new(p).parent())
        .map(|p| p.to_path_buf())
        .unwrap_or_default();
    let in_root = |p: &String| resolve_path(&root, p);

    let input_path = args
        .input
        .clone()
        .or_else(|| config.as_ref().map(|c| in_root(&c.input.file_path)))
        .context(MissingArgumentSnafu { what: "input file" })?;

    let provider = match args
        .input_type
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.input.provider.clone()))
    {
        Some(name) => InputProvider::from_name(&name)?,
        None => InputProvider::from_path(&input_path),
    };
    let excel_worksheet_name = args.excel_worksheet_name.clone().or_else(|| {
        config
            .as_ref()
            .and_then(|c| c.input.excel_worksheet_name.clone())
    });

    let weights = match (&args.weights, config.as_ref().and_then(|c| c.weights.as_ref())) {
        (Some(s), _) => parse_weights(s)?,
        (None, Some(js)) => read_js_weights(js)?,
        (None, None) => return MissingArgumentSnafu { what: "weights" }.fail().map_err(Box::new),
    };
    let impacts = match (&args.impacts, config.as_ref().and_then(|c| c.impacts.as_ref())) {
        (Some(s), _) => parse_impacts(s),
        (None, Some(js)) => read_js_impacts(js)?,
        (None, None) => return MissingArgumentSnafu { what: "impacts" }.fail().map_err(Box::new),
    };

    let output_config = config.as_ref().and_then(|c| c.output.clone());
    let output_path = args
        .output
        .clone()
        .or_else(|| {
            output_config
                .as_ref()
                .and_then(|o| o.file_path.as_ref().map(in_root))
        })
        .context(MissingArgumentSnafu {
            what: "output file",
        })?;
    let summary_path = args.summary.clone().or_else(|| {
        output_config
            .as_ref()
            .and_then(|o| o.summary_path.as_ref().map(in_root))
    });
    let reference_path = args.reference.clone().or_else(|| {
        output_config
            .as_ref()
            .and_then(|o| o.reference_path.as_ref().map(in_root))
    });

    let rules_config = config.as_ref().and_then(|c| c.rules.clone());
    let rules = validate_rules(
        args.tie_rank_mode
            .clone()
            .or_else(|| rules_config.as_ref().and_then(|r| r.tie_rank_mode.clone())),
        args.degenerate
            .clone()
            .or_else(|| rules_config.as_ref().and_then(|r| r.degenerate_mode.clone())),
    )?;

    Ok(RunSettings {
        input_path,
        provider,
        excel_worksheet_name,
        weights,
        impacts,
        output_path,
        summary_path,
        reference_path,
        rules,
    })
}

fn read_table(settings: &RunSettings) -> BRunResult<DecisionTable> {
    match settings.provider {
        InputProvider::Csv => read_csv_table(&settings.input_path),
        InputProvider::Excel => {
            read_excel_table(&settings.input_path, &settings.excel_worksheet_name)
        }
    }
}

fn completion_message(output_path: &str) -> String {
    format!(
        "Topsis calculation completed successfully!\nResults saved to '{}'",
        output_path
    )
}

pub fn run(args: &Args) -> BRunResult<()> {
    let settings = resolve_settings(args)?;
    debug!("run: settings: {:?}", settings);

    check_input_exists(&settings.input_path)?;
    let table = read_table(&settings)?;
    info!(
        "Read {} alternatives from {}",
        table.rows.len(),
        simplify_file_name(&settings.input_path)
    );

    let res = run_topsis(
        &table,
        &settings.weights,
        &settings.impacts,
        &settings.rules,
    )
    .context(TopsisSnafu {})?;
    info!("Ranking: {:?}", res.ranking());
    if res.rows.iter().any(|r| r.score.is_nan()) {
        warn!("Some scores are not defined, they are ranked last");
    }

    let output = render_csv(&res, &settings.output_path)?;
    write_file(&output, &settings.output_path)?;

    if let Some(summary_path) = &settings.summary_path {
        write_summary(&res, summary_path)?;
        info!("Summary written to {}", summary_path);
    }

    if let Some(reference_path) = &settings.reference_path {
        check_reference(&output, reference_path)?;
    }

    println!("{}", completion_message(&settings.output_path));
    Ok(())
}
