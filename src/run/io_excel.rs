// Primitives for reading Excel workbooks.

use calamine::{open_workbook_auto, DataType, Range, Reader};

use crate::run::*;

/// Reads a table from a worksheet. The first row is the header.
///
/// Trailing header cells that are empty are dropped. A row with a value under
/// such a cell keeps it, and is reported like a ragged CSV line. Rows that are
/// completely empty are skipped.
pub fn read_excel_table(path: &str, worksheet_name: &Option<String>) -> BRunResult<DecisionTable> {
    let wrange = get_range(path, worksheet_name)?;

    let mut iter = wrange.rows();
    let header_row = iter.next().context(EmptyInputSnafu { path })?;
    let mut header: Vec<String> = header_row.iter().map(read_label).collect();
    while header.last().map(|s| s.is_empty()).unwrap_or(false) {
        header.pop();
    }
    debug!("read_excel_table: header: {:?}", header);
    if header.is_empty() {
        return Err(Box::new(RunError::EmptyInput {
            path: path.to_string(),
        }));
    }
    let width = header.len();

    let mut rows: Vec<Row> = Vec::new();
    for (idx, row) in iter.enumerate() {
        if row.iter().all(|c| matches!(c, DataType::Empty)) {
            debug!("read_excel_table: idx: {:?} skipping empty row", idx);
            continue;
        }
        let r = read_row(row, width);
        debug!(
            "read_excel_table: idx: {:?} id: {:?} cells: {:?}",
            idx, r.id, r.cells
        );
        rows.push(r);
    }
    Ok(DecisionTable { header, rows })
}

// The range is as wide as its widest row: only the empty cells past the header are padding.
fn read_row(row: &[DataType], width: usize) -> Row {
    let id = row.first().map(read_label).unwrap_or_default();
    let used = row
        .iter()
        .rposition(|c| !matches!(c, DataType::Empty))
        .map(|p| p + 1)
        .unwrap_or(0)
        .max(width);
    if used > width {
        warn!(
            "read_excel_table: row {:?} has values beyond the {} header columns",
            id, width
        );
    }
    let cells: Vec<Cell> = row.iter().take(used).skip(1).map(read_cell).collect();
    Row { id, cells }
}

fn read_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::Float(f) => Cell::Number(*f),
        DataType::Int(i) => Cell::Number(*i as f64),
        DataType::String(s) => Cell::from_text(s),
        DataType::Empty => Cell::Empty,
        // Booleans, dates and formula errors are not criterion values.
        _ => Cell::Text(format!("{:?}", cell)),
    }
}

// Identifiers and column names.
fn read_label(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Empty => "".to_string(),
        _ => format!("{:?}", cell),
    }
}

fn get_range(path: &str, worksheet_name_o: &Option<String>) -> BRunResult<Range<DataType>> {
    debug!(
        "read_excel_table: path: {:?} worksheet: {:?}",
        path, worksheet_name_o
    );
    let mut workbook = open_workbook_auto(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(MissingWorksheetSnafu {
                path,
                worksheet: worksheet_name.as_str(),
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let wrange = workbook
            .worksheet_range_at(0)
            .context(EmptyInputSnafu { path })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    }
}
