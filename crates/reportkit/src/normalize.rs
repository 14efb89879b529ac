//! Per-category normalisation for series measured in different units.
//!
//! Each category position is rescaled on its own: the values of every series
//! at position `i` form one column, and only that column decides the scale.

/// Normalised values next to the untouched originals.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    pub normalized: Vec<Vec<f64>>,
    pub original: Vec<Vec<f64>>,
}

/// Normalise one column of values.
///
/// Branch order matters: an all-equal column is 50 everywhere even when
/// every value is positive.
pub fn normalize_column(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![50.0; values.len()];
    }
    if min >= 0.0 {
        values.iter().map(|v| v / max * 100.0).collect()
    } else if max <= 0.0 {
        values.iter().map(|v| v / min.abs() * 100.0).collect()
    } else {
        let max_abs = min.abs().max(max.abs());
        values.iter().map(|v| v / max_abs * 50.0 + 50.0).collect()
    }
}

/// True when the column holds both negative and positive values.
pub fn is_mixed_sign(values: &[f64]) -> bool {
    values.iter().any(|v| *v < 0.0) && values.iter().any(|v| *v > 0.0)
}

/// Normalise every category column across `series`.
///
/// Series may be ragged; a column only contains the series that reach it.
pub fn normalize_columns(series: &[Vec<f64>]) -> NormalizedSeries {
    let width = series.iter().map(Vec::len).max().unwrap_or(0);
    let mut normalized: Vec<Vec<f64>> = series.iter().map(|s| vec![0.0; s.len()]).collect();

    for i in 0..width {
        let members: Vec<usize> = (0..series.len()).filter(|&s| i < series[s].len()).collect();
        let column: Vec<f64> = members.iter().map(|&s| series[s][i]).collect();
        for (&s, v) in members.iter().zip(normalize_column(&column)) {
            normalized[s][i] = v;
        }
    }

    NormalizedSeries {
        normalized,
        original: series.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_column_is_relative_to_max() {
        assert_eq!(normalize_column(&[10.0, 5.0]), vec![100.0, 50.0]);
    }

    #[test]
    fn equal_column_is_centred() {
        assert_eq!(normalize_column(&[7.0, 7.0]), vec![50.0, 50.0]);
        assert_eq!(normalize_column(&[0.0, 0.0, 0.0]), vec![50.0; 3]);
    }

    #[test]
    fn mixed_column_is_centred_on_fifty() {
        assert_eq!(normalize_column(&[-10.0, 20.0]), vec![25.0, 100.0]);
    }

    #[test]
    fn negative_column_is_relative_to_min() {
        assert_eq!(normalize_column(&[-10.0, -5.0]), vec![-100.0, -50.0]);
    }

    #[test]
    fn columns_are_independent() {
        let out = normalize_columns(&[vec![10.0, 20.0], vec![5.0, 80.0]]);
        assert_eq!(out.normalized[0], vec![100.0, 25.0]);
        assert_eq!(out.normalized[1], vec![50.0, 100.0]);
        assert_eq!(out.original, vec![vec![10.0, 20.0], vec![5.0, 80.0]]);
    }

    #[test]
    fn ragged_series_only_join_columns_they_reach() {
        let out = normalize_columns(&[vec![4.0, 2.0, 9.0], vec![8.0]]);
        assert_eq!(out.normalized[0], vec![50.0, 50.0, 50.0]);
        assert_eq!(out.normalized[1], vec![100.0]);
    }
}
