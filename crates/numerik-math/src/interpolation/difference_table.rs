//! Forward-difference tables.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Triangular table of forward differences.
///
/// Column 0 holds the samples; column `j` holds `n - j` entries with
/// `Δ^j y[i] = Δ^(j-1) y[i+1] - Δ^(j-1) y[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceTable {
    columns: Vec<Vec<f64>>,
}

impl DifferenceTable {
    /// Builds the full table from the samples.
    ///
    /// # Example
    ///
    /// ```rust
    /// use numerik_math::interpolation::DifferenceTable;
    ///
    /// let table = DifferenceTable::build(&[1.0, 2.0, 5.0, 10.0]);
    /// assert_eq!(table.column(1), &[1.0, 3.0, 5.0]);
    /// assert_eq!(table.column(2), &[2.0, 2.0]);
    /// assert_eq!(table.column(3), &[0.0]);
    /// ```
    pub fn build(values: &[f64]) -> Self {
        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(values.len());
        if !values.is_empty() {
            columns.push(values.to_vec());
        }
        while let Some(prev) = columns.last() {
            if prev.len() <= 1 {
                break;
            }
            let next = prev.windows(2).map(|w| w[1] - w[0]).collect();
            columns.push(next);
        }
        Self { columns }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// True if built from no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The samples (column 0).
    pub fn values(&self) -> &[f64] {
        self.column(0)
    }

    /// All differences of a given order; empty past the highest order.
    pub fn column(&self, order: usize) -> &[f64] {
        self.columns.get(order).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `Δ^order y[row]`, if that entry lies in the triangle.
    pub fn get(&self, row: usize, order: usize) -> Option<f64> {
        self.columns.get(order)?.get(row).copied()
    }

    /// `Δ^order y[0]`, the entries used by the forward formula. Zero past the
    /// highest order.
    pub fn leading(&self, order: usize) -> f64 {
        self.get(0, order).unwrap_or(0.0)
    }

    /// The differences available at a row, ordered by difference order.
    pub fn row(&self, row: usize) -> Vec<f64> {
        self.columns
            .iter()
            .map_while(|column| column.get(row).copied())
            .collect()
    }

    /// Rows labelled with their abscissae, for display.
    pub fn labelled_rows(&self, xs: &[f64]) -> Vec<TableRow> {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| TableRow {
                x,
                differences: self.row(i),
            })
            .collect()
    }
}

/// One row of a difference table.
///
/// Serializes as `{"x": .., "Δ^0y": .., "Δ^1y": .., ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Sample abscissa.
    pub x: f64,
    /// `Δ^j y` for `j` in `0..n - i`.
    pub differences: Vec<f64>,
}

impl Serialize for TableRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.differences.len() + 1))?;
        map.serialize_entry("x", &self.x)?;
        for (order, value) in self.differences.iter().enumerate() {
            map.serialize_entry(&format!("Δ^{order}y"), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_triangle_shape() {
        let table = DifferenceTable::build(&[1.0, 2.0, 5.0, 10.0]);

        assert_eq!(table.len(), 4);
        for order in 0..4 {
            assert_eq!(table.column(order).len(), 4 - order);
        }
        assert!(table.column(4).is_empty());
        assert_eq!(table.get(3, 1), None);
        assert_eq!(table.get(1, 2), Some(2.0));
    }

    #[test]
    fn test_rows() {
        let table = DifferenceTable::build(&[1.0, 2.0, 5.0, 10.0]);

        assert_eq!(table.row(0), vec![1.0, 1.0, 2.0, 0.0]);
        assert_eq!(table.row(1), vec![2.0, 3.0, 2.0]);
        assert_eq!(table.row(2), vec![5.0, 5.0]);
        assert_eq!(table.row(3), vec![10.0]);
    }

    #[test]
    fn test_leading_differences() {
        let table = DifferenceTable::build(&[1.0, 2.0, 5.0]);

        assert_eq!(table.leading(0), 1.0);
        assert_eq!(table.leading(1), 1.0);
        assert_eq!(table.leading(2), 2.0);
        assert_eq!(table.leading(3), 0.0);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(DifferenceTable::build(&[]).is_empty());

        let table = DifferenceTable::build(&[4.0]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.row(0), vec![4.0]);
    }

    #[test]
    fn test_row_serialization() {
        let table = DifferenceTable::build(&[1.0, 2.0, 5.0]);
        let rows = table.labelled_rows(&[0.0, 1.0, 2.0]);

        let json = serde_json::to_value(&rows).unwrap();

        assert_eq!(json[0]["x"], 0.0);
        assert_eq!(json[0]["Δ^0y"], 1.0);
        assert_eq!(json[0]["Δ^1y"], 1.0);
        assert_eq!(json[0]["Δ^2y"], 2.0);
        assert!(json[2].get("Δ^1y").is_none());
    }

    proptest! {
        #[test]
        fn prop_first_column_reproduces_samples(
            values in prop::collection::vec(-1e6f64..1e6, 0..12)
        ) {
            let table = DifferenceTable::build(&values);
            prop_assert_eq!(table.values(), values.as_slice());
            for (i, v) in values.iter().enumerate() {
                prop_assert_eq!(table.get(i, 0), Some(*v));
            }
        }

        #[test]
        fn prop_recurrence_holds(
            values in prop::collection::vec(-1e3f64..1e3, 2..10)
        ) {
            let table = DifferenceTable::build(&values);
            for order in 1..values.len() {
                for row in 0..values.len() - order {
                    let expected = table.get(row + 1, order - 1).unwrap()
                        - table.get(row, order - 1).unwrap();
                    prop_assert_eq!(table.get(row, order), Some(expected));
                }
            }
        }
    }
}
