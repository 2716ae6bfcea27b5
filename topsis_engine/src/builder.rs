pub use crate::config::*;

/// A builder for assembling a decision table row by row.
///
/// ```
/// pub use topsis_engine::builder::Builder;
/// pub use topsis_engine::TopsisRules;
/// # use topsis_engine::TopsisErrors;
///
/// let mut builder = Builder::new(&TopsisRules::DEFAULT_RULES)?
///     .header(&["Model".to_string(), "Price".to_string(), "Storage".to_string()])?;
///
/// builder.add_row_simple("M1", &[250.0, 16.0])?;
/// builder.add_row_simple("M2", &[200.0, 32.0])?;
///
/// let res = builder.compute(&[1.0, 1.0], &["-".to_string(), "+".to_string()])?;
/// assert_eq!(res.rows[1].rank, 1);
///
/// # Ok::<(), TopsisErrors>(())
/// ```
pub struct Builder {
    pub(crate) _rules: TopsisRules,
    pub(crate) _header: Vec<String>,
    pub(crate) _rows: Vec<Row>,
}

impl Builder {
    pub fn new(rules: &TopsisRules) -> Result<Builder, TopsisErrors> {
        Ok(Builder {
            _rules: rules.clone(),
            _header: Vec::new(),
            _rows: Vec::new(),
        })
    }

    /// Sets the names of the columns: the identifier column first, then the criteria.
    ///
    /// The rows already added are discarded.
    pub fn header(self, names: &[String]) -> Result<Builder, TopsisErrors> {
        if names.len() < 3 {
            return Err(TopsisErrors::Shape {
                expected_columns: 3,
                found_columns: names.len(),
                row: None,
            });
        }
        Ok(Builder {
            _rules: self._rules,
            _header: names.to_vec(),
            _rows: Vec::new(),
        })
    }

    /// Adds an alternative whose criterion values are all known numbers.
    pub fn add_row_simple(&mut self, id: &str, values: &[f64]) -> Result<(), TopsisErrors> {
        let cells: Vec<Cell> = values.iter().map(|x| Cell::Number(*x)).collect();
        self.add_row_2(&Row {
            id: id.to_string(),
            cells,
        })
    }

    /// Adds an alternative from the textual content of its cells.
    ///
    /// Cells that cannot be read as numbers are kept as text and will be
    /// reported by the validation.
    pub fn add_row(&mut self, id: &str, values: &[String]) -> Result<(), TopsisErrors> {
        let cells: Vec<Cell> = values.iter().map(|s| Cell::from_text(s)).collect();
        self.add_row_2(&Row {
            id: id.to_string(),
            cells,
        })
    }

    pub fn add_row_2(&mut self, row: &Row) -> Result<(), TopsisErrors> {
        let expected = self._header.len().saturating_sub(1);
        if row.cells.len() != expected {
            return Err(TopsisErrors::Shape {
                expected_columns: expected,
                found_columns: row.cells.len(),
                row: Some(row.id.clone()),
            });
        }
        self._rows.push(row.clone());
        Ok(())
    }

    pub fn table(&self) -> DecisionTable {
        DecisionTable {
            header: self._header.clone(),
            rows: self._rows.clone(),
        }
    }

    /// Runs the ranking on the rows added so far.
    pub fn compute(&self, weights: &[f64], impacts: &[String]) -> Result<RankedTable, TopsisErrors> {
        crate::run_topsis(&self.table(), weights, impacts, &self._rules)
    }
}
