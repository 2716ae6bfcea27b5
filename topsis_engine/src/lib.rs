mod config;
pub mod builder;
pub mod manual;

use log::{debug, info, warn};

use std::cmp::Ordering;

pub use crate::config::*;

// **** Private structures ****

// The criterion values of the table, one vector per alternative, in the same order as the rows.
// Invariant: all the vectors have the same length.
type Matrix = Vec<Vec<f64>>;

/// Ranks the alternatives of a table with the default rules.
///
/// Arguments:
/// * `table` the alternatives and their criterion values
/// * `weights` one weight per criterion, in column order. They do not need to sum to 1.
/// * `impacts` one impact token per criterion (`+` or `-`), in column order.
pub fn compute(
    table: &DecisionTable,
    weights: &[f64],
    impacts: &[String],
) -> Result<RankedTable, TopsisErrors> {
    run_topsis(table, weights, impacts, &TopsisRules::DEFAULT_RULES)
}

/// Runs the TOPSIS algorithm with the given rules.
///
/// The input is fully validated before any computation. The output contains
/// the rows in the same order as the input.
pub fn run_topsis(
    table: &DecisionTable,
    weights: &[f64],
    impacts: &[String],
    rules: &TopsisRules,
) -> Result<RankedTable, TopsisErrors> {
    info!(
        "Processing {:?} alternatives, criteria: {:?}, rules: {:?}",
        table.rows.len(),
        table.criteria(),
        rules
    );

    let checked_impacts = checks(table, weights, impacts, rules)?;
    let matrix = criterion_matrix(table);

    let normalized = normalize(&matrix);
    let weighted = apply_weights(&normalized, weights);
    let ideal_point = ideal_points(&weighted, &checked_impacts);
    info!(
        "Ideal best: {:?} ideal worst: {:?}",
        ideal_point.best, ideal_point.worst
    );

    let dists = distances(&weighted, &ideal_point);
    let scores = closeness(&dists);

    if scores.iter().any(|s| s.is_nan()) {
        match rules.degenerate_mode {
            DegenerateMode::Reject => return Err(TopsisErrors::ConstantTable),
            DegenerateMode::Propagate => {
                warn!(
                    "run_topsis: {} alternatives have an undefined score",
                    scores.iter().filter(|s| s.is_nan()).count()
                );
            }
        }
    }

    let ranks = rank_scores(&scores, rules.tie_rank_mode);

    let mut rows: Vec<RankedRow> = Vec::with_capacity(table.rows.len());
    for (idx, row) in table.rows.iter().enumerate() {
        debug!(
            "run_topsis: {}: distances {:?} score {:?} rank {:?}",
            row.id, dists[idx], scores[idx], ranks[idx]
        );
        rows.push(RankedRow {
            id: row.id.clone(),
            cells: row.cells.clone(),
            distances: dists[idx],
            score: scores[idx],
            rank: ranks[idx],
        });
    }

    let res = RankedTable {
        header: table.header.clone(),
        rows,
        weights: weights.to_vec(),
        impacts: checked_impacts,
        ideal_point,
    };

    {
        let mut sorted: Vec<&RankedRow> = res.rows.iter().collect();
        sorted.sort_by_key(|r| r.rank);
        for r in sorted {
            info!("{:>6} {:.6} {}", r.rank, r.score, r.id);
        }
    }

    Ok(res)
}

/// Checks that the input can be processed, with the default rules.
///
/// Returns the impacts resolved from their tokens.
pub fn validate(
    table: &DecisionTable,
    weights: &[f64],
    impacts: &[String],
) -> Result<Vec<Impact>, TopsisErrors> {
    checks(table, weights, impacts, &TopsisRules::DEFAULT_RULES)
}

// The checks are done in a fixed order and the first failure is returned.
fn checks(
    table: &DecisionTable,
    weights: &[f64],
    impacts: &[String],
    rules: &TopsisRules,
) -> Result<Vec<Impact>, TopsisErrors> {
    debug!(
        "checks: header: {:?} rows: {:?}",
        table.header,
        table.rows.len()
    );
    if table.header.len() < 3 {
        return Err(TopsisErrors::Shape {
            expected_columns: 3,
            found_columns: table.header.len(),
            row: None,
        });
    }
    let num_criteria = table.num_criteria();
    for row in table.rows.iter() {
        if row.cells.len() != num_criteria {
            return Err(TopsisErrors::Shape {
                expected_columns: num_criteria,
                found_columns: row.cells.len(),
                row: Some(row.id.clone()),
            });
        }
    }
    if table.rows.is_empty() {
        return Err(TopsisErrors::EmptyTable);
    }

    for (col_idx, column) in table.criteria().iter().enumerate() {
        for row in table.rows.iter() {
            match &row.cells[col_idx] {
                Cell::Number(x) if x.is_finite() => {}
                c => {
                    return Err(TopsisErrors::NotNumeric {
                        column: column.clone(),
                        row: row.id.clone(),
                        content: c.to_string(),
                    });
                }
            }
        }
    }

    if weights.len() != num_criteria {
        return Err(TopsisErrors::LengthMismatch {
            what: "weights",
            expected: num_criteria,
            found: weights.len(),
        });
    }
    if impacts.len() != num_criteria {
        return Err(TopsisErrors::LengthMismatch {
            what: "impacts",
            expected: num_criteria,
            found: impacts.len(),
        });
    }

    let mut checked_impacts: Vec<Impact> = Vec::with_capacity(num_criteria);
    for token in impacts.iter() {
        let impact = Impact::from_token(token).ok_or_else(|| TopsisErrors::ImpactSymbol {
            token: token.clone(),
        })?;
        checked_impacts.push(impact);
    }

    for (index, w) in weights.iter().enumerate() {
        if !(w.is_finite() && *w > 0.0) {
            return Err(TopsisErrors::InvalidWeight { index, value: *w });
        }
    }

    if rules.degenerate_mode == DegenerateMode::Reject {
        for (col_idx, column) in table.criteria().iter().enumerate() {
            let all_zeros = table
                .rows
                .iter()
                .all(|r| r.cells[col_idx].as_number() == Some(0.0));
            if all_zeros {
                return Err(TopsisErrors::ZeroColumn {
                    column: column.clone(),
                });
            }
        }
    }

    debug!("checks: impacts: {:?}", checked_impacts);
    Ok(checked_impacts)
}

// Only called on validated tables: all the cells are numbers.
fn criterion_matrix(table: &DecisionTable) -> Matrix {
    table
        .rows
        .iter()
        .map(|r| r.cells.iter().filter_map(|c| c.as_number()).collect())
        .collect()
}

fn num_columns(matrix: &[Vec<f64>]) -> usize {
    matrix.first().map(|r| r.len()).unwrap_or(0)
}

/// Vector normalization: every value is divided by the Euclidean norm of its column.
///
/// A column of zeros has a norm of zero and produces NaN values.
pub fn normalize(matrix: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let norms: Vec<f64> = (0..num_columns(matrix))
        .map(|j| column_norm(matrix.iter().map(|r| r[j])))
        .collect();
    debug!("normalize: norms: {:?}", norms);
    matrix
        .iter()
        .map(|r| r.iter().zip(norms.iter()).map(|(x, n)| x / n).collect())
        .collect()
}

// Euclidean norm, computed on values scaled by the largest magnitude so that
// squaring neither overflows nor underflows.
fn column_norm(values: impl Iterator<Item = f64> + Clone) -> f64 {
    let scale = values.clone().fold(0.0, |m: f64, x| m.max(x.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return values.map(|x| x * x).sum::<f64>().sqrt();
    }
    scale * values.map(|x| (x / scale) * (x / scale)).sum::<f64>().sqrt()
}

/// Scales every column by its weight.
pub fn apply_weights(matrix: &[Vec<f64>], weights: &[f64]) -> Vec<Vec<f64>> {
    matrix
        .iter()
        .map(|r| r.iter().zip(weights.iter()).map(|(x, w)| x * w).collect())
        .collect()
}

/// The best and worst values of each column, according to the impact of the column.
///
/// NaN values are skipped. A column made only of NaN values gives NaN.
pub fn ideal_points(matrix: &[Vec<f64>], impacts: &[Impact]) -> IdealPoint {
    let mut best: Vec<f64> = Vec::with_capacity(impacts.len());
    let mut worst: Vec<f64> = Vec::with_capacity(impacts.len());
    for (j, impact) in impacts.iter().enumerate() {
        let max = matrix.iter().map(|r| r[j]).fold(f64::NAN, f64::max);
        let min = matrix.iter().map(|r| r[j]).fold(f64::NAN, f64::min);
        match impact {
            Impact::Benefit => {
                best.push(max);
                worst.push(min);
            }
            Impact::Cost => {
                best.push(min);
                worst.push(max);
            }
        }
    }
    IdealPoint { best, worst }
}

fn euclidean(xs: &[f64], ys: &[f64]) -> f64 {
    xs.iter()
        .zip(ys.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// The distances of every alternative to the best and worst points.
pub fn distances(matrix: &[Vec<f64>], ideal_point: &IdealPoint) -> Vec<Distances> {
    matrix
        .iter()
        .map(|r| Distances {
            to_best: euclidean(r, &ideal_point.best),
            to_worst: euclidean(r, &ideal_point.worst),
        })
        .collect()
}

/// The closeness coefficient of every alternative.
///
/// It is NaN when an alternative is at distance zero from both points.
pub fn closeness(dists: &[Distances]) -> Vec<f64> {
    dists
        .iter()
        .map(|d| d.to_worst / (d.to_best + d.to_worst))
        .collect()
}

// Descending order, NaN values last.
fn compare_scores_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

fn same_score(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Turns scores into ranks: the highest score gets rank 1 and equal scores get equal ranks.
///
/// Scores are compared exactly. NaN scores share the rank after all the other scores.
pub fn rank_scores(scores: &[f64], mode: TieRankMode) -> Vec<u32> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|a, b| compare_scores_desc(scores[*a], scores[*b]));

    let mut ranks: Vec<u32> = vec![0; scores.len()];
    let mut current_rank: u32 = 0;
    let mut distinct_scores: u32 = 0;
    for (pos, idx) in order.iter().enumerate() {
        let is_new_score = pos == 0 || !same_score(scores[order[pos - 1]], scores[*idx]);
        if is_new_score {
            distinct_scores += 1;
            current_rank = match mode {
                TieRankMode::Competition => (pos + 1) as u32,
                TieRankMode::Dense => distinct_scores,
            };
        }
        ranks[*idx] = current_rank;
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn make_table(header: &[&str], rows: &[(&str, Vec<f64>)]) -> DecisionTable {
        DecisionTable {
            header: header.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|(id, values)| Row {
                    id: id.to_string(),
                    cells: values.iter().map(|x| Cell::Number(*x)).collect(),
                })
                .collect(),
        }
    }

    fn tokens(ts: &[&str]) -> Vec<String> {
        ts.iter().map(|s| s.to_string()).collect()
    }

    fn phones() -> DecisionTable {
        make_table(
            &["Model", "Price", "Storage", "Camera", "Looks"],
            &[
                ("M1", vec![250.0, 16.0, 12.0, 5.0]),
                ("M2", vec![200.0, 16.0, 8.0, 3.0]),
                ("M3", vec![300.0, 32.0, 16.0, 4.0]),
                ("M4", vec![275.0, 32.0, 8.0, 4.0]),
                ("M5", vec![225.0, 16.0, 16.0, 2.0]),
            ],
        )
    }

    fn assert_close(xs: &[f64], ys: &[f64]) {
        assert_eq!(xs.len(), ys.len());
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert!((x - y).abs() < 1e-9, "{:?} != {:?}", xs, ys);
        }
    }

    #[test]
    fn phones_reference_scores() {
        init();
        let res = compute(&phones(), &[1.0, 1.0, 1.0, 1.0], &tokens(&["-", "+", "+", "+"]))
            .unwrap();
        let scores: Vec<f64> = res.rows.iter().map(|r| r.score).collect();
        assert_close(
            &scores,
            &[
                0.5342768571821003,
                0.3083677687324685,
                0.6916322312675315,
                0.534736584486838,
                0.40104612151678615,
            ],
        );
        let ranks: Vec<u32> = res.rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![3, 5, 1, 2, 4]);
        assert_eq!(res.ranking(), tokens(&["M3", "M4", "M1", "M5", "M2"]));
    }

    #[rstest]
    #[case(1e200)]
    #[case(1e-200)]
    fn scores_do_not_depend_on_column_scale(#[case] factor: f64) {
        init();
        let impacts = tokens(&["-", "+", "+", "+"]);
        let weights = [1.0, 1.0, 1.0, 1.0];
        let reference = compute(&phones(), &weights, &impacts).unwrap();

        let mut scaled = phones();
        for row in scaled.rows.iter_mut() {
            if let Cell::Number(x) = row.cells[0] {
                row.cells[0] = Cell::Number(x * factor);
            }
        }
        let res = compute(&scaled, &weights, &impacts).unwrap();

        let scores = |t: &RankedTable| t.rows.iter().map(|r| r.score).collect::<Vec<f64>>();
        assert_close(&scores(&res), &scores(&reference));
        let ranks: Vec<u32> = res.rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![3, 5, 1, 2, 4]);
    }

    #[rstest]
    #[case(1.0)]
    #[case(1e200)]
    #[case(1e-200)]
    fn heavy_extreme_column_keeps_its_weight(#[case] factor: f64) {
        let table = make_table(
            &["Id", "A", "B"],
            &[("r1", vec![3.0 * factor, 1.0]), ("r2", vec![1.0 * factor, 2.0])],
        );
        let res = compute(&table, &[10.0, 1.0], &tokens(&["+", "+"])).unwrap();
        let ranks: Vec<u32> = res.rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
        assert!(res.rows[0].score > 0.9);
    }

    #[test]
    fn normalized_columns_have_unit_norm() {
        let normalized = normalize(&[vec![3e200, 4e-200], vec![4e200, 3e-200]]);
        assert_close(&normalized[0], &[0.6, 0.8]);
        assert_close(&normalized[1], &[0.8, 0.6]);
    }

    #[test]
    fn all_benefit_dominating_row_wins() {
        let table = make_table(
            &["Id", "A", "B", "C"],
            &[
                ("r1", vec![1.0, 2.0, 3.0]),
                ("r2", vec![4.0, 5.0, 6.0]),
                ("r3", vec![2.0, 3.0, 1.0]),
                ("r4", vec![3.0, 1.0, 2.0]),
            ],
        );
        let res = compute(&table, &[1.0, 1.0, 1.0], &tokens(&["+", "+", "+"])).unwrap();
        assert_eq!(res.rows[1].rank, 1);
        assert_eq!(res.rows[1].score, 1.0);
        assert_eq!(res.rows[1].distances.to_best, 0.0);
    }

    #[test]
    fn cheapest_is_closest_to_ideal() {
        let table = make_table(
            &["Id", "Price", "Quality", "Speed"],
            &[
                ("cheap", vec![100.0, 5.0, 5.0]),
                ("pricey", vec![300.0, 5.0, 5.0]),
                ("middle", vec![200.0, 5.0, 5.0]),
            ],
        );
        let res = compute(&table, &[1.0, 1.0, 1.0], &tokens(&["-", "+", "+"])).unwrap();
        assert_eq!(res.rows[0].score, 1.0);
        assert_eq!(res.rows[1].score, 0.0);
        assert!(res.rows[0].score > res.rows[2].score);
        assert_eq!(res.ranking(), tokens(&["cheap", "middle", "pricey"]));
    }

    #[test]
    fn identical_rows_share_score_and_rank() {
        let table = make_table(
            &["Id", "A", "B", "C"],
            &[
                ("x", vec![3.0, 4.0, 5.0]),
                ("y", vec![1.0, 9.0, 2.0]),
                ("x-bis", vec![3.0, 4.0, 5.0]),
                ("z", vec![7.0, 2.0, 2.0]),
            ],
        );
        let res = compute(&table, &[1.0, 2.0, 1.0], &tokens(&["+", "-", "+"])).unwrap();
        assert_eq!(res.rows[0].score, res.rows[2].score);
        assert_eq!(res.rows[0].rank, res.rows[2].rank);
    }

    #[test]
    fn weights_change_the_ranking() {
        let impacts = tokens(&["-", "+", "+", "+"]);
        let equal = compute(&phones(), &[1.0, 1.0, 1.0, 1.0], &impacts).unwrap();
        let heavy_price = compute(&phones(), &[2.0, 1.0, 1.0, 1.0], &impacts).unwrap();
        assert_eq!(equal.ranking(), tokens(&["M3", "M4", "M1", "M5", "M2"]));
        assert_eq!(heavy_price.ranking(), tokens(&["M3", "M1", "M4", "M5", "M2"]));
        assert_ne!(equal.ideal_point, heavy_price.ideal_point);
    }

    #[test]
    fn output_keeps_rows_and_cells() {
        let table = phones();
        let res = compute(&table, &[1.0, 1.0, 1.0, 1.0], &tokens(&["-", "+", "+", "+"])).unwrap();
        assert_eq!(res.header, table.header);
        assert_eq!(res.rows.len(), table.rows.len());
        for (r, input) in res.rows.iter().zip(table.rows.iter()) {
            assert_eq!(r.id, input.id);
            assert_eq!(r.cells, input.cells);
        }
        assert_eq!(res.impacts, vec![Impact::Cost, Impact::Benefit, Impact::Benefit, Impact::Benefit]);
    }

    #[test]
    fn stages() {
        let matrix = vec![vec![3.0, 1.0], vec![4.0, 1.0]];
        let normalized = normalize(&matrix);
        assert_close(&normalized[0], &[0.6, 1.0 / 2f64.sqrt()]);
        assert_close(&normalized[1], &[0.8, 1.0 / 2f64.sqrt()]);

        let weighted = apply_weights(&normalized, &[2.0, 1.0]);
        assert_close(&weighted[0], &[1.2, 1.0 / 2f64.sqrt()]);

        let ip = ideal_points(&weighted, &[Impact::Cost, Impact::Benefit]);
        assert_close(&ip.best, &[1.2, 1.0 / 2f64.sqrt()]);
        assert_close(&ip.worst, &[1.6, 1.0 / 2f64.sqrt()]);

        let dists = distances(&weighted, &ip);
        assert_close(&[dists[0].to_best, dists[0].to_worst], &[0.0, 0.4]);
        assert_close(&[dists[1].to_best, dists[1].to_worst], &[0.4, 0.0]);
        assert_eq!(closeness(&dists), vec![1.0, 0.0]);
    }

    #[test]
    fn competition_ranks() {
        let ranks = rank_scores(&[0.5, 0.9, 0.9, 0.1], TieRankMode::Competition);
        assert_eq!(ranks, vec![3, 1, 1, 4]);
    }

    #[test]
    fn dense_ranks() {
        let ranks = rank_scores(&[0.5, 0.9, 0.9, 0.1], TieRankMode::Dense);
        assert_eq!(ranks, vec![2, 1, 1, 3]);
    }

    #[test]
    fn nan_scores_rank_last() {
        let ranks = rank_scores(&[f64::NAN, 0.2, f64::NAN, 0.7], TieRankMode::Competition);
        assert_eq!(ranks, vec![3, 2, 3, 1]);
        assert!(rank_scores(&[], TieRankMode::Dense).is_empty());
    }

    #[test]
    fn too_few_criteria() {
        let table = make_table(&["Id", "A"], &[("r1", vec![1.0]), ("r2", vec![2.0])]);
        let err = validate(&table, &[1.0], &tokens(&["+"])).unwrap_err();
        assert_eq!(
            err,
            TopsisErrors::Shape {
                expected_columns: 3,
                found_columns: 2,
                row: None
            }
        );
    }

    #[test]
    fn ragged_row() {
        let mut table = make_table(&["Id", "A", "B"], &[("r1", vec![1.0, 2.0])]);
        table.rows.push(Row {
            id: "r2".to_string(),
            cells: vec![Cell::Number(1.0)],
        });
        let err = validate(&table, &[1.0, 1.0], &tokens(&["+", "+"])).unwrap_err();
        assert!(matches!(err, TopsisErrors::Shape { row: Some(r), .. } if r == "r2"));
    }

    #[test]
    fn empty_table() {
        let table = make_table(&["Id", "A", "B"], &[]);
        let err = validate(&table, &[1.0, 1.0], &tokens(&["+", "+"])).unwrap_err();
        assert_eq!(err, TopsisErrors::EmptyTable);
    }

    #[rstest]
    #[case(Cell::Text("abc".to_string()), "abc")]
    #[case(Cell::Empty, "")]
    #[case(Cell::Number(f64::INFINITY), "inf")]
    fn non_numeric_cell(#[case] cell: Cell, #[case] content: &str) {
        let mut table = make_table(&["Id", "A", "B"], &[("r1", vec![1.0, 2.0]), ("r2", vec![3.0, 4.0])]);
        table.rows[1].cells[1] = cell;
        let err = validate(&table, &[1.0, 1.0], &tokens(&["+", "+"])).unwrap_err();
        assert_eq!(
            err,
            TopsisErrors::NotNumeric {
                column: "B".to_string(),
                row: "r2".to_string(),
                content: content.to_string(),
            }
        );
    }

    #[rstest]
    #[case(vec![1.0, 1.0], vec!["+", "+", "+"], "weights", 2)]
    #[case(vec![1.0, 1.0, 1.0, 1.0], vec!["+", "+", "+"], "weights", 4)]
    #[case(vec![1.0, 1.0, 1.0], vec!["+", "+"], "impacts", 2)]
    #[case(vec![1.0, 1.0, 1.0], vec!["+", "+", "-", "-"], "impacts", 4)]
    fn length_mismatch(
        #[case] weights: Vec<f64>,
        #[case] impacts: Vec<&str>,
        #[case] what: &str,
        #[case] found: usize,
    ) {
        let table = make_table(
            &["Id", "A", "B", "C"],
            &[("r1", vec![1.0, 2.0, 3.0]), ("r2", vec![3.0, 2.0, 1.0])],
        );
        let err = validate(&table, &weights, &tokens(&impacts)).unwrap_err();
        assert!(
            matches!(&err, TopsisErrors::LengthMismatch { what: w, expected: 3, found: f } if *w == what && *f == found),
            "{:?}",
            err
        );
    }

    #[rstest]
    #[case("+", Some(Impact::Benefit))]
    #[case(" - ", Some(Impact::Cost))]
    #[case("Benefit", Some(Impact::Benefit))]
    #[case("COST", Some(Impact::Cost))]
    #[case("*", None)]
    #[case("", None)]
    #[case("++", None)]
    fn impact_tokens(#[case] token: &str, #[case] expected: Option<Impact>) {
        assert_eq!(Impact::from_token(token), expected);
    }

    #[test]
    fn bad_impact_symbol() {
        let table = make_table(&["Id", "A", "B"], &[("r1", vec![1.0, 2.0]), ("r2", vec![3.0, 4.0])]);
        let err = validate(&table, &[1.0, 1.0], &tokens(&["+", "x"])).unwrap_err();
        assert_eq!(
            err,
            TopsisErrors::ImpactSymbol {
                token: "x".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "Impacts must be '+', '-', 'benefit' or 'cost'. Found: 'x'"
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn bad_weight(#[case] w: f64) {
        let table = make_table(&["Id", "A", "B"], &[("r1", vec![1.0, 2.0]), ("r2", vec![3.0, 4.0])]);
        let err = validate(&table, &[1.0, w], &tokens(&["+", "+"])).unwrap_err();
        assert!(matches!(err, TopsisErrors::InvalidWeight { index: 1, .. }));
    }

    #[test]
    fn zero_column_is_rejected() {
        let table = make_table(&["Id", "A", "B"], &[("r1", vec![0.0, 2.0]), ("r2", vec![0.0, 4.0])]);
        let err = compute(&table, &[1.0, 1.0], &tokens(&["+", "+"])).unwrap_err();
        assert_eq!(
            err,
            TopsisErrors::ZeroColumn {
                column: "A".to_string()
            }
        );
    }

    #[test]
    fn zero_column_propagates_nan() {
        init();
        let rules = TopsisRules {
            degenerate_mode: DegenerateMode::Propagate,
            ..TopsisRules::DEFAULT_RULES
        };
        let table = make_table(&["Id", "A", "B"], &[("r1", vec![0.0, 2.0]), ("r2", vec![0.0, 4.0])]);
        let res = run_topsis(&table, &[1.0, 1.0], &tokens(&["+", "+"]), &rules).unwrap();
        assert!(res.rows.iter().all(|r| r.score.is_nan()));
        assert!(res.rows.iter().all(|r| r.rank == 1));
        assert!(res.ideal_point.best[0].is_nan());
    }

    #[test]
    fn constant_table() {
        let table = make_table(&["Id", "A", "B"], &[("r1", vec![1.0, 2.0]), ("r2", vec![1.0, 2.0])]);
        let err = compute(&table, &[1.0, 1.0], &tokens(&["+", "-"])).unwrap_err();
        assert_eq!(err, TopsisErrors::ConstantTable);

        let rules = TopsisRules {
            degenerate_mode: DegenerateMode::Propagate,
            ..TopsisRules::DEFAULT_RULES
        };
        let res = run_topsis(&table, &[1.0, 1.0], &tokens(&["+", "-"]), &rules).unwrap();
        assert!(res.rows[0].score.is_nan());
    }

    fn table_strategy() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<f64>, Vec<bool>)> {
        (2usize..6, 2usize..12).prop_flat_map(|(n, m)| {
            (
                prop::collection::vec(prop::collection::vec(1.0f64..1000.0, n), m),
                prop::collection::vec(0.1f64..10.0, n),
                prop::collection::vec(any::<bool>(), n),
            )
        })
    }

    fn to_input(values: &[Vec<f64>], benefit: &[bool]) -> (DecisionTable, Vec<String>) {
        let mut header = vec!["Id".to_string()];
        header.extend((0..benefit.len()).map(|j| format!("C{}", j)));
        let table = DecisionTable {
            header,
            rows: values
                .iter()
                .enumerate()
                .map(|(i, r)| Row {
                    id: format!("A{}", i),
                    cells: r.iter().map(|x| Cell::Number(*x)).collect(),
                })
                .collect(),
        };
        let impacts = benefit
            .iter()
            .map(|b| if *b { "+" } else { "-" }.to_string())
            .collect();
        (table, impacts)
    }

    proptest! {
        #[test]
        fn scores_are_bounded((values, weights, benefit) in table_strategy()) {
            let (table, impacts) = to_input(&values, &benefit);
            let res = compute(&table, &weights, &impacts).unwrap();
            for r in res.rows.iter() {
                prop_assert!((0.0..=1.0).contains(&r.score), "score {:?}", r.score);
            }
        }

        #[test]
        fn ranks_follow_scores((values, weights, benefit) in table_strategy()) {
            let (table, impacts) = to_input(&values, &benefit);
            let res = compute(&table, &weights, &impacts).unwrap();
            for a in res.rows.iter() {
                prop_assert!(a.rank >= 1 && a.rank as usize <= res.rows.len());
                for b in res.rows.iter() {
                    if a.score > b.score {
                        prop_assert!(a.rank < b.rank);
                    }
                    if a.score == b.score {
                        prop_assert_eq!(a.rank, b.rank);
                    }
                }
            }
        }

        #[test]
        fn shape_is_preserved((values, weights, benefit) in table_strategy()) {
            let (table, impacts) = to_input(&values, &benefit);
            let res = compute(&table, &weights, &impacts).unwrap();
            prop_assert_eq!(res.rows.len(), table.rows.len());
            prop_assert_eq!(res.header.len(), table.header.len());
            prop_assert!(res.rows.iter().all(|r| r.cells.len() == table.num_criteria()));
        }
    }
}
