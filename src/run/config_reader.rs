use crate::run::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct InputSource {
    /// `csv` or `excel`. Guessed from the file extension if missing.
    pub provider: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    #[serde(rename = "summaryPath")]
    pub summary_path: Option<String>,
    #[serde(rename = "referencePath")]
    pub reference_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RulesSettings {
    #[serde(rename = "tieRankMode")]
    pub tie_rank_mode: Option<String>,
    #[serde(rename = "degenerateMode")]
    pub degenerate_mode: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct TopsisConfig {
    pub input: InputSource,
    /// A comma-separated string or an array of numbers.
    pub weights: Option<JSValue>,
    /// A comma-separated string or an array of strings.
    pub impacts: Option<JSValue>,
    pub output: Option<OutputSettings>,
    pub rules: Option<RulesSettings>,
}

pub fn read_config(path: &str) -> BRunResult<TopsisConfig> {
    let contents = fs::read_to_string(path).context(ReadingFileSnafu { path })?;
    let config: TopsisConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_js_weights(x: &JSValue) -> RunResult<Vec<f64>> {
    match x {
        JSValue::String(s) => parse_weights(s),
        JSValue::Array(l) => l
            .iter()
            .map(|v| {
                v.as_f64().context(WeightParseSnafu {
                    token: v.to_string(),
                })
            })
            .collect(),
        _ => WeightParseSnafu {
            token: x.to_string(),
        }
        .fail(),
    }
}

pub fn read_js_impacts(x: &JSValue) -> RunResult<Vec<String>> {
    match x {
        JSValue::String(s) => Ok(parse_impacts(s)),
        JSValue::Array(l) => Ok(l
            .iter()
            .map(|v| match v {
                JSValue::String(s) => s.trim().to_string(),
                _ => v.to_string(),
            })
            .collect()),
        _ => whatever!("impacts must be a string or a list of strings, found {}", x),
    }
}

pub fn read_tie_rank_mode(s: &str) -> RunResult<TieRankMode> {
    match s {
        "competition" | "min" => Ok(TieRankMode::Competition),
        "dense" => Ok(TieRankMode::Dense),
        x => whatever!("unknown tie rank mode: {} (expected competition or dense)", x),
    }
}

pub fn read_degenerate_mode(s: &str) -> RunResult<DegenerateMode> {
    match s {
        "reject" => Ok(DegenerateMode::Reject),
        "propagate" => Ok(DegenerateMode::Propagate),
        x => whatever!("unknown degenerate mode: {} (expected reject or propagate)", x),
    }
}

/// Builds the rules, the command line taking precedence over the configuration file.
pub fn validate_rules(
    tie_rank_mode: Option<String>,
    degenerate_mode: Option<String>,
) -> RunResult<TopsisRules> {
    let mut rules = TopsisRules::DEFAULT_RULES;
    if let Some(s) = tie_rank_mode {
        rules.tie_rank_mode = read_tie_rank_mode(s.as_str())?;
    }
    if let Some(s) = degenerate_mode {
        rules.degenerate_mode = read_degenerate_mode(s.as_str())?;
    }
    Ok(rules)
}
