use super::matrix::DailyCountMatrix;

/// Number of bars a frame of the chart shows.
pub const TOP_ENTITIES: usize = 10;

/// Zeroes every cell that does not rank within the `top` values of its row.
///
/// Ranking uses the "min" method on descending values: equal values share
/// the best rank they cover, so a tie at the boundary keeps more than `top`
/// cells non-zero.
pub fn keep_top_per_row(matrix: &mut DailyCountMatrix, top: usize) {
    for row in matrix.rows_mut() {
        let mut sorted = row.clone();
        sorted.sort_unstable_by(|a, b| b.cmp(a));

        for value in row.iter_mut() {
            let rank = sorted.partition_point(|other| *other > *value) + 1;
            if rank > top {
                *value = 0;
            }
        }
    }
}

/// Removes columns that are zero on every row.
pub fn drop_empty_columns(matrix: &mut DailyCountMatrix) {
    let width = matrix.entities().len();
    let mut keep = vec![false; width];
    for row in matrix.rows() {
        for (col, value) in row.iter().enumerate() {
            if *value != 0 {
                keep[col] = true;
            }
        }
    }
    matrix.retain_columns(&keep);
}

/// Replaces each zero with the last non-zero value above it in the same column.
///
/// Zeros before the first non-zero value stay zero.
pub fn forward_fill_zeros(matrix: &mut DailyCountMatrix) {
    let width = matrix.entities().len();
    let mut last = vec![0u64; width];
    for row in matrix.rows_mut() {
        for (col, value) in row.iter_mut().enumerate() {
            if *value == 0 {
                *value = last[col];
            } else {
                last[col] = *value;
            }
        }
    }
}

/// Bounds the chart to the leading entities of each day.
///
/// Entities outside the top of a day are masked, entities that never make it
/// are dropped, and masked gaps hold the entity's last shown value.
pub fn optimize_table(mut matrix: DailyCountMatrix) -> DailyCountMatrix {
    keep_top_per_row(&mut matrix, TOP_ENTITIES);
    drop_empty_columns(&mut matrix);
    forward_fill_zeros(&mut matrix);
    matrix
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn matrix(columns: &[(&str, &[(u32, u64)])]) -> DailyCountMatrix {
        let counts: BTreeMap<String, BTreeMap<NaiveDate, u64>> = columns
            .iter()
            .map(|(name, days)| {
                (
                    name.to_string(),
                    days.iter().map(|(d, n)| (day(*d), *n)).collect(),
                )
            })
            .collect();
        DailyCountMatrix::from_daily_counts(&counts)
    }

    #[test]
    fn lowest_values_are_masked() {
        let mut m = matrix(&[("A", &[(1, 3)]), ("B", &[(1, 2)]), ("C", &[(1, 1)])]);
        keep_top_per_row(&mut m, 2);
        assert_eq!(m.rows(), &[vec![3, 2, 0]]);
    }

    #[test]
    fn ties_share_the_best_rank() {
        let mut m = matrix(&[("A", &[(1, 5)]), ("B", &[(1, 2)]), ("C", &[(1, 2)])]);
        keep_top_per_row(&mut m, 2);
        assert_eq!(m.rows(), &[vec![5, 2, 2]]);
    }

    #[test]
    fn empty_columns_are_dropped() {
        let mut m = matrix(&[("A", &[(1, 3)]), ("B", &[(1, 2)]), ("C", &[(1, 1)])]);
        keep_top_per_row(&mut m, 1);
        drop_empty_columns(&mut m);
        assert_eq!(m.entities(), &["A".to_string()]);
    }

    #[test]
    fn masked_cells_hold_last_value() {
        // C is shown on day 1, pushed out on days 2 and 3, and back on day 4.
        let mut m = matrix(&[
            ("A", &[(2, 5)]),
            ("B", &[(2, 4)]),
            ("C", &[(1, 1), (4, 9)]),
        ]);
        keep_top_per_row(&mut m, 2);
        assert_eq!(m.column("C").unwrap(), vec![1, 0, 0, 10]);

        forward_fill_zeros(&mut m);
        assert_eq!(m.column("C").unwrap(), vec![1, 1, 1, 10]);
        assert_eq!(m.column("A").unwrap(), vec![0, 5, 5, 5]);
    }
}
