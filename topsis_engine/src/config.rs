// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One cell of a decision table, as classified by the readers.
///
/// The engine never parses text: a reader decides whether a cell holds a
/// number, and the validator refuses anything else in a criterion column.
#[derive(PartialEq, Debug, Clone)]
pub enum Cell {
    Number(f64),
    /// Some content that could not be understood as a number.
    Text(String),
    /// A missing value.
    Empty,
}

impl Cell {
    /// Classifies some text content. Surrounding whitespace is ignored.
    pub fn from_text(s: &str) -> Cell {
        let t = s.trim();
        if t.is_empty() {
            Cell::Empty
        } else if let Ok(x) = t.parse::<f64>() {
            Cell::Number(x)
        } else {
            Cell::Text(t.to_string())
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(x) => Some(*x),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(x) => write!(f, "{}", x),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Empty => Ok(()),
        }
    }
}

/// One alternative: an opaque identifier and one cell per criterion.
#[derive(PartialEq, Debug, Clone)]
pub struct Row {
    pub id: String,
    pub cells: Vec<Cell>,
}

/// The input table.
///
/// The header contains the name of every column, including the identifier
/// column in first position. The criteria are the remaining columns, in order.
#[derive(PartialEq, Debug, Clone)]
pub struct DecisionTable {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
}

impl DecisionTable {
    /// The names of the criterion columns (all the columns but the first one).
    pub fn criteria(&self) -> &[String] {
        self.header.get(1..).unwrap_or(&[])
    }

    pub fn num_criteria(&self) -> usize {
        self.header.len().saturating_sub(1)
    }
}

/// The direction of a criterion.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Impact {
    /// Higher values are better.
    Benefit,
    /// Lower values are better.
    Cost,
}

impl Impact {
    /// Resolves an impact token.
    ///
    /// The accepted tokens are `+` and `-`, and the names `benefit` and `cost`
    /// in any case. Surrounding whitespace is ignored.
    pub fn from_token(token: &str) -> Option<Impact> {
        match token.trim() {
            "+" => Some(Impact::Benefit),
            "-" => Some(Impact::Cost),
            s if s.eq_ignore_ascii_case("benefit") => Some(Impact::Benefit),
            s if s.eq_ignore_ascii_case("cost") => Some(Impact::Cost),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Impact::Benefit => "+",
            Impact::Cost => "-",
        }
    }
}

// ******** Output data structures *********

/// The reference points of a run, one value per criterion.
#[derive(PartialEq, Debug, Clone)]
pub struct IdealPoint {
    pub best: Vec<f64>,
    pub worst: Vec<f64>,
}

/// Euclidean distances of one alternative to the ideal point.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Distances {
    pub to_best: f64,
    pub to_worst: f64,
}

#[derive(PartialEq, Debug, Clone)]
pub struct RankedRow {
    pub id: String,
    /// The cells of the input row, unchanged.
    pub cells: Vec<Cell>,
    pub distances: Distances,
    /// The closeness coefficient, in [0, 1] for non-degenerate inputs.
    pub score: f64,
    /// 1 is the best rank.
    pub rank: u32,
}

/// The outcome of a run: the input table extended with a score and a rank.
///
/// Rows are in the same order as in the input table.
#[derive(PartialEq, Debug, Clone)]
pub struct RankedTable {
    pub header: Vec<String>,
    pub rows: Vec<RankedRow>,
    pub weights: Vec<f64>,
    pub impacts: Vec<Impact>,
    pub ideal_point: IdealPoint,
}

impl RankedTable {
    pub fn criteria(&self) -> &[String] {
        self.header.get(1..).unwrap_or(&[])
    }

    /// The identifiers of the alternatives, from the best to the worst.
    ///
    /// Alternatives sharing a rank keep their input order.
    pub fn ranking(&self) -> Vec<String> {
        let mut rows: Vec<&RankedRow> = self.rows.iter().collect();
        rows.sort_by_key(|r| r.rank);
        rows.iter().map(|r| r.id.clone()).collect()
    }
}

/// Errors that prevent the algorithm from completing successfully.
///
/// All of them are detected before any numeric stage runs, except
/// `ConstantTable` which needs the distances.
#[derive(PartialEq, Debug, Clone)]
pub enum TopsisErrors {
    /// The table does not have at least two criteria, or a row does not
    /// have one cell per criterion.
    Shape {
        expected_columns: usize,
        found_columns: usize,
        row: Option<String>,
    },
    EmptyTable,
    /// A criterion cell is not a finite number.
    NotNumeric {
        column: String,
        row: String,
        content: String,
    },
    /// `what` is either "weights" or "impacts".
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    ImpactSymbol { token: String },
    InvalidWeight { index: usize, value: f64 },
    /// A criterion column only contains zeros and cannot be normalized.
    ZeroColumn { column: String },
    /// Every criterion is constant: all the alternatives coincide with both
    /// ideal points.
    ConstantTable,
}

impl Error for TopsisErrors {}

impl Display for TopsisErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TopsisErrors::Shape {
                expected_columns,
                found_columns,
                row: None,
            } => write!(
                f,
                "Input file must contain three or more columns (expected at least {}, found {})",
                expected_columns, found_columns
            ),
            TopsisErrors::Shape {
                expected_columns,
                found_columns,
                row: Some(r),
            } => write!(
                f,
                "Row '{}' has {} criterion values, expected {}",
                r, found_columns, expected_columns
            ),
            TopsisErrors::EmptyTable => write!(f, "Input file does not contain any alternative"),
            TopsisErrors::NotNumeric {
                column,
                row,
                content,
            } => write!(
                f,
                "Column '{}' contains non-numeric values (row '{}': {:?}). From 2nd to last columns must be numeric only.",
                column, row, content
            ),
            TopsisErrors::LengthMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "Number of {} ({}) must be equal to number of criteria ({})",
                what, found, expected
            ),
            TopsisErrors::ImpactSymbol { token } => write!(
                f,
                "Impacts must be '+', '-', 'benefit' or 'cost'. Found: '{}'",
                token
            ),
            TopsisErrors::InvalidWeight { index, value } => write!(
                f,
                "Weight #{} must be a positive number. Found: {}",
                index + 1,
                value
            ),
            TopsisErrors::ZeroColumn { column } => write!(
                f,
                "Column '{}' only contains zeros and cannot be normalized",
                column
            ),
            TopsisErrors::ConstantTable => write!(
                f,
                "All the criteria are constant: the alternatives cannot be distinguished"
            ),
        }
    }
}

// ********* Configuration **********

/// How tied scores are turned into ranks.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TieRankMode {
    /// Tied alternatives share the best position, the next position is
    /// skipped: 1, 1, 3.
    Competition,
    /// Tied alternatives share a position, no position is skipped: 1, 1, 2.
    Dense,
}

/// What to do with inputs that lead to a division by zero.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum DegenerateMode {
    /// Fail the run with `ZeroColumn` or `ConstantTable`.
    Reject,
    /// Carry on and let NaN values flow to the scores.
    /// NaN scores are ranked after all the other alternatives.
    Propagate,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TopsisRules {
    pub tie_rank_mode: TieRankMode,
    pub degenerate_mode: DegenerateMode,
}

impl TopsisRules {
    pub const DEFAULT_RULES: TopsisRules = TopsisRules {
        tie_rank_mode: TieRankMode::Competition,
        degenerate_mode: DegenerateMode::Reject,
    };
}

impl Default for TopsisRules {
    fn default() -> Self {
        TopsisRules::DEFAULT_RULES
    }
}
