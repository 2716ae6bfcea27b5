use std::path::Path;

use crate::run::*;

/// The supported formats for the input table.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputProvider {
    Csv,
    Excel,
}

impl InputProvider {
    pub fn from_name(name: &str) -> RunResult<InputProvider> {
        match name.to_lowercase().as_str() {
            "csv" => Ok(InputProvider::Csv),
            "excel" | "xlsx" | "xls" => Ok(InputProvider::Excel),
            x => whatever!("Input type not implemented {:?}", x),
        }
    }

    /// Excel workbooks are recognized by their extension, everything else is read as CSV.
    pub fn from_path(path: &str) -> InputProvider {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        match ext.as_deref() {
            Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("ods") => {
                InputProvider::Excel
            }
            _ => InputProvider::Csv,
        }
    }
}

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Paths from a configuration file are relative to the directory of this file.
pub fn resolve_path(root: &Path, path: &str) -> String {
    if Path::new(path).is_absolute() {
        path.to_string()
    } else {
        root.join(path).display().to_string()
    }
}

pub fn check_input_exists(path: &str) -> RunResult<()> {
    ensure!(Path::new(path).is_file(), FileNotFoundSnafu { path });
    Ok(())
}

/// Parses a comma-separated list of weights, such as `1,1,0.5`.
pub fn parse_weights(s: &str) -> RunResult<Vec<f64>> {
    s.split(',')
        .map(|t| {
            let token = t.trim();
            token
                .parse::<f64>()
                .ok()
                .context(WeightParseSnafu { token })
        })
        .collect()
}

/// Splits a comma-separated list of impacts, such as `+,-,+`.
///
/// The tokens are checked by the engine.
pub fn parse_impacts(s: &str) -> Vec<String> {
    s.split(',').map(|t| t.trim().to_string()).collect()
}
