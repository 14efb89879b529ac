//! Forgiving (de)serialisers for hand-written report descriptions.
use serde::de::{Deserialize, Deserializer};
use serde::ser::{SerializeSeq, Serializer};
use serde_json::Value;

use crate::charts::Chart;

/// Category labels. Strings are kept as given, other scalars become their
/// JSON text (`2021` becomes `"2021"`).
pub fn labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(label_text).collect())
}

pub(crate) fn label_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Data values. `null` reads back as NaN, which is how serde_json writes it.
pub fn numbers<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}

/// A section's chart list. Entries that do not parse are kept as
/// [`Chart::Malformed`] so the assembler can put a placeholder in their slot.
pub fn charts<'de, D>(deserializer: D) -> Result<Vec<Chart>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(Chart::from_value).collect())
}

/// Malformed entries are written back exactly as they were read.
pub fn serialize_charts<S>(charts: &[Chart], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(charts.len()))?;
    for chart in charts {
        match chart {
            Chart::Malformed(m) => seq.serialize_element(&m.source)?,
            other => seq.serialize_element(other)?,
        }
    }
    seq.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "labels")]
        labels: Vec<String>,
        #[serde(deserialize_with = "numbers")]
        data: Vec<f64>,
    }

    #[test]
    fn scalar_labels_become_text() {
        let parsed: Sample =
            serde_json::from_str(r#"{"labels": [2021, "Q2", 3.5, true, null], "data": []}"#).unwrap();
        assert_eq!(parsed.labels, vec!["2021", "Q2", "3.5", "true", ""]);
    }

    #[test]
    fn null_data_is_nan() {
        let parsed: Sample = serde_json::from_str(r#"{"labels": [], "data": [1, null, -2.5]}"#).unwrap();
        assert_eq!(parsed.data[0], 1.0);
        assert!(parsed.data[1].is_nan());
        assert_eq!(parsed.data[2], -2.5);
    }

    #[test]
    fn non_numeric_data_is_still_an_error() {
        assert!(serde_json::from_str::<Sample>(r#"{"labels": [], "data": ["x"]}"#).is_err());
    }
}
