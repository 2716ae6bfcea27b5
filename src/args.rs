use clap::error::ErrorKind;
use clap::Parser;

/// This is a program ranking alternatives with the TOPSIS method.
///
/// Example: topsis data.csv "1,1,1,1" "-,+,+,+" result.csv
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The table of alternatives, in CSV or Excel format. The first column identifies
    /// the alternatives, the other columns are the criteria.
    #[clap(value_parser)]
    pub input: Option<String>,

    /// (comma-separated numbers) One weight per criterion, for example "1,1,2".
    #[clap(value_parser, allow_hyphen_values = true)]
    pub weights: Option<String>,

    /// (comma-separated '+' or '-') One impact per criterion, for example "+,-,+".
    /// '+' is a criterion to maximize, '-' a criterion to minimize.
    #[clap(value_parser, allow_hyphen_values = true)]
    pub impacts: Option<String>,

    /// (file path) The CSV file in which the scores and ranks are written.
    #[clap(value_parser)]
    pub output: Option<String>,

    /// (file path, optional) A JSON file with all the settings of the run. Values passed
    /// on the command line override the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) If specified, a summary of the run (ideal points, distances,
    /// scores and ranks) will be written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    /// (file path, optional) A reference output in CSV format. If provided, topsis will
    /// check that the computed output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (csv or excel) The type of the input. Guessed from the extension of the file by default.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    /// The first worksheet is used by default.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (competition or dense, default competition) How tied scores are ranked.
    #[clap(long, value_parser)]
    pub tie_rank_mode: Option<String>,

    /// (reject or propagate, default reject) What to do with criteria made only of zeros
    /// or tables in which every criterion is constant.
    #[clap(long, value_parser)]
    pub degenerate: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

/// The exit code for an argument error: help and version requests succeed,
/// any other problem with the command line is a failure.
pub fn usage_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
