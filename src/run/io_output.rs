// Primitives for writing the results.

use crate::run::*;

pub const SCORE_COLUMN: &str = "Topsis Score";
pub const RANK_COLUMN: &str = "Rank";

/// The output table in CSV format: the input columns followed by the score and the rank.
pub fn render_csv(res: &RankedTable, path: &str) -> BRunResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<String> = res.header.clone();
    header.push(SCORE_COLUMN.to_string());
    header.push(RANK_COLUMN.to_string());
    wtr.write_record(&header)
        .context(WritingCsvSnafu { path })?;

    for row in res.rows.iter() {
        let mut record: Vec<String> = vec![row.id.clone()];
        record.extend(row.cells.iter().map(|c| c.to_string()));
        record.push(row.score.to_string());
        record.push(row.rank.to_string());
        wtr.write_record(&record)
            .context(WritingCsvSnafu { path })?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| e.into_error())
        .context(WritingOutputSnafu { path })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn write_file(contents: &str, path: &str) -> BRunResult<()> {
    fs::write(path, contents).context(WritingOutputSnafu { path })?;
    Ok(())
}

/// A summary of the run: the criteria with their ideal values, and the
/// distances of each alternative.
pub fn build_summary_js(res: &RankedTable) -> JSValue {
    let criteria: Vec<JSValue> = res
        .criteria()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            json!({
                "name": name,
                "weight": res.weights[idx],
                "impact": res.impacts[idx].symbol(),
                "idealBest": res.ideal_point.best[idx],
                "idealWorst": res.ideal_point.worst[idx],
            })
        })
        .collect();

    let results: Vec<JSValue> = res
        .rows
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "distanceToBest": r.distances.to_best,
                "distanceToWorst": r.distances.to_worst,
                "score": r.score,
                "rank": r.rank,
            })
        })
        .collect();

    json!({ "criteria": criteria, "results": results, "ranking": res.ranking() })
}

pub fn write_summary(res: &RankedTable, path: &str) -> BRunResult<()> {
    let js = build_summary_js(res);
    let pretty = serde_json::to_string_pretty(&js).context(ParsingJsonSnafu {})?;
    write_file(&pretty, path)
}

/// Compares the produced CSV with a reference file, line by line.
///
/// Trailing whitespace and line ending differences are ignored.
pub fn check_reference(produced: &str, reference_path: &str) -> BRunResult<()> {
    let reference = fs::read_to_string(reference_path).context(ReadingFileSnafu {
        path: reference_path,
    })?;
    let normalize = |s: &str| -> String {
        s.lines()
            .map(|l| l.trim_end())
            .filter(|l| !l.is_empty())
            .collect::<Vec<&str>>()
            .join("\n")
    };
    let ref_n = normalize(&reference);
    let produced_n = normalize(produced);
    if ref_n != produced_n {
        warn!("Found differences with the reference file {}", reference_path);
        print_diff(ref_n.as_str(), produced_n.as_str(), "\n");
        return Err(Box::new(RunError::ReferenceMismatch {
            path: reference_path.to_string(),
        }));
    }
    info!("Output matches the reference file {}", reference_path);
    Ok(())
}
