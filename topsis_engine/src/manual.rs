/*!

This is the long-form manual for `topsis_engine` and the `topsis` program.

## The method

TOPSIS ranks alternatives by how close they are to an ideal alternative and
how far they are from the worst possible one. For a table with one row per
alternative and one column per criterion:

1. each column is divided by its Euclidean norm,
2. each column is multiplied by its weight,
3. the ideal best and ideal worst values are taken for each column: the maximum
   and the minimum for a benefit criterion, the other way around for a cost
   criterion,
4. the Euclidean distances of each alternative to the best and worst points are
   computed,
5. the score is `distance_to_worst / (distance_to_best + distance_to_worst)`
   and the alternatives are ranked by decreasing score.

## Input formats

The input is a table with a header row. The first column identifies the
alternatives and is never used in the computation. All the other columns are
criteria and must be numeric.

| Model | Price | Storage | Camera | Looks |
|-------|-------|---------|--------|-------|
| M1    | 250   | 16      | 12     | 5     |
| M2    | 200   | 16      | 8      | 3     |
| M3    | 300   | 32      | 16     | 4     |

The following formats are supported by the `topsis` program:
* `csv` Comma Separated Values. This is the default.
* `excel` Excel workbooks (`.xlsx`, `.xlsm`, `.xls`). The first worksheet is read
  unless a worksheet name is given with `--excel-worksheet-name`.

The format is guessed from the extension of the file, use `--input-type` to
force it.

## Weights and impacts

Both are given as comma-separated lists with one entry per criterion, in the order of the columns:

```bash
topsis data.csv "1,1,1,2" "-,+,+,+" result.csv
```

Weights are positive numbers and do not need to sum to 1. Impacts are `+` for a
criterion to maximize (benefit) and `-` for a criterion to minimize (cost).
`benefit` and `cost` are also accepted.

## Ranks and ties

Alternatives with exactly the same score get the same rank. By default the
ranks follow the competition style (`1, 1, 3`): the position after a tie is
skipped. The `dense` style (`1, 1, 2`) can be selected with
`--tie-rank-mode dense`.

## Degenerate inputs

A criterion made only of zeros cannot be normalized, and a table in which
every criterion is constant gives the same distance of zero to both ideal
points. By default, these inputs are rejected with an error. With
`--degenerate propagate` the computation goes on and the undefined scores are
reported as `NaN`, ranked after all the other alternatives.

## Configuration

All the options can be stored in a JSON file passed with `--config`:

```json
{
  "input": { "filePath": "data.csv", "provider": "csv" },
  "weights": "1,1,1,1",
  "impacts": "-,+,+,+",
  "output": { "filePath": "result.csv", "summaryPath": "summary.json" },
  "rules": { "tieRankMode": "competition", "degenerateMode": "reject" }
}
```

Paths are relative to the directory of the configuration file. Values given on
the command line take precedence.

## Output

The output is a CSV file with the columns of the input, followed by the
`Topsis Score` and `Rank` columns. The rows are in the same order as in the
input. A JSON summary with the ideal points and the distances of every
alternative can be written with `--summary`.

*/
