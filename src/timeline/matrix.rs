use std::collections::BTreeMap;

use chrono::NaiveDate;

/// Cumulative play counts, one row per calendar day and one column per entity.
///
/// Rows are dense and ascending: every day between the first and the last
/// date is present exactly once. Columns are sorted by label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyCountMatrix {
    dates: Vec<NaiveDate>,
    entities: Vec<String>,
    rows: Vec<Vec<u64>>,
}

impl DailyCountMatrix {
    /// A matrix without rows or columns.
    pub fn empty() -> Self {
        Self {
            dates: Vec::new(),
            entities: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Pivots per-day counts into a dense matrix of running totals.
    ///
    /// `counts` maps each entity to its plays per day. Days without plays
    /// between the earliest and latest observed day become zero-count rows
    /// before the running sum is taken.
    pub fn from_daily_counts(counts: &BTreeMap<String, BTreeMap<NaiveDate, u64>>) -> Self {
        let min_date = counts.values().filter_map(|days| days.keys().next()).min();
        let max_date = counts.values().filter_map(|days| days.keys().last()).max();

        let (min_date, max_date) = match (min_date, max_date) {
            (Some(min), Some(max)) => (*min, *max),
            _ => return Self::empty(),
        };

        let dates: Vec<NaiveDate> = min_date.iter_days().take_while(|d| *d <= max_date).collect();
        let entities: Vec<String> = counts.keys().cloned().collect();

        let mut rows = vec![vec![0u64; entities.len()]; dates.len()];
        for (col, days) in counts.values().enumerate() {
            let mut running = 0u64;
            for (row, date) in dates.iter().enumerate() {
                running += days.get(date).copied().unwrap_or(0);
                rows[row][col] = running;
            }
        }

        Self {
            dates,
            entities,
            rows,
        }
    }

    /// Row labels, ascending and without gaps.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Column labels, sorted.
    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    pub fn rows(&self) -> &[Vec<u64>] {
        &self.rows
    }

    /// True when there is no day or no entity to show.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.entities.is_empty()
    }

    /// Values of one entity from the first day to the last.
    ///
    /// # Arguments
    ///
    /// * `entity` - The exact label, including the `\n` between artist and
    ///   album or track.
    ///
    /// # Returns
    ///
    /// `None` when no column carries that label.
    pub fn column(&self, entity: &str) -> Option<Vec<u64>> {
        let col = self.entities.iter().position(|e| e == entity)?;
        Some(self.rows.iter().map(|row| row[col]).collect())
    }

    /// Value of `entity` on `date`, `None` when either is not in the matrix.
    pub fn value(&self, date: NaiveDate, entity: &str) -> Option<u64> {
        let row = self.dates.iter().position(|d| *d == date)?;
        let col = self.entities.iter().position(|e| e == entity)?;
        Some(self.rows[row][col])
    }

    /// Largest value in the matrix, 0 when it is empty.
    pub fn max_value(&self) -> u64 {
        self.rows
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0)
    }

    /// Entities of the last row ordered by value, highest first.
    pub fn final_standings(&self) -> Vec<(&str, u64)> {
        let Some(last) = self.rows.last() else {
            return Vec::new();
        };

        let mut standings: Vec<(&str, u64)> = self
            .entities
            .iter()
            .map(String::as_str)
            .zip(last.iter().copied())
            .collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        standings
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<u64>> {
        &mut self.rows
    }

    /// Keeps only the columns for which `keep` returns true.
    pub(crate) fn retain_columns(&mut self, keep: &[bool]) {
        let mut flags = keep.iter();
        self.entities.retain(|_| *flags.next().unwrap_or(&false));
        for row in &mut self.rows {
            let mut flags = keep.iter();
            row.retain(|_| *flags.next().unwrap_or(&false));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn gaps_are_filled_and_summed() {
        let mut counts = BTreeMap::new();
        counts.insert("A".to_string(), BTreeMap::from([(day(1), 2), (day(4), 1)]));
        counts.insert("B".to_string(), BTreeMap::from([(day(3), 5)]));

        let matrix = DailyCountMatrix::from_daily_counts(&counts);

        assert_eq!(matrix.dates(), &[day(1), day(2), day(3), day(4)]);
        assert_eq!(matrix.column("A").unwrap(), vec![2, 2, 2, 3]);
        assert_eq!(matrix.column("B").unwrap(), vec![0, 0, 5, 5]);
        assert_eq!(matrix.max_value(), 5);
    }

    #[test]
    fn no_counts_give_empty_matrix() {
        let matrix = DailyCountMatrix::from_daily_counts(&BTreeMap::new());
        assert!(matrix.is_empty());
        assert!(matrix.final_standings().is_empty());
    }

    #[test]
    fn retain_columns_drops_matching_cells() {
        let mut counts = BTreeMap::new();
        counts.insert("A".to_string(), BTreeMap::from([(day(1), 1)]));
        counts.insert("B".to_string(), BTreeMap::from([(day(1), 2)]));
        counts.insert("C".to_string(), BTreeMap::from([(day(1), 3)]));
        let mut matrix = DailyCountMatrix::from_daily_counts(&counts);

        matrix.retain_columns(&[true, false, true]);

        assert_eq!(matrix.entities(), &["A".to_string(), "C".to_string()]);
        assert_eq!(matrix.rows(), &[vec![1, 3]]);
    }
}
