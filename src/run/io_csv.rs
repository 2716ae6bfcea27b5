// Primitives for reading CSV files.

use std::fs::File;

use crate::run::*;

/// Reads a table whose first record is the header.
///
/// Records may have a different number of fields than the header: the
/// engine reports such rows with their identifier.
pub fn read_csv_table(path: &str) -> BRunResult<DecisionTable> {
    let mut rdr = get_reader(path)?;

    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu { path, lineno: 1usize })?
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    debug!("read_csv_table: header: {:?}", header);
    if header.iter().all(|s| s.is_empty()) {
        return Err(Box::new(RunError::EmptyInput {
            path: path.to_string(),
        }));
    }

    let mut rows: Vec<Row> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is on the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { path, lineno })?;
        let mut fields = line.iter();
        let id = fields.next().unwrap_or("").trim().to_string();
        let cells: Vec<Cell> = fields.map(Cell::from_text).collect();
        debug!("read_csv_table: lineno: {:?} id: {:?} cells: {:?}", lineno, id, cells);
        rows.push(Row { id, cells });
    }
    Ok(DecisionTable { header, rows })
}

fn get_reader(path: &str) -> RunResult<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })
}
