//! Serialised plotly figures.
//!
//! Renderers build a typed [`plotly::Plot`] and freeze it into a
//! [`PlotSpec`], the `{"data": [...], "layout": {...}}` document that
//! plotly.js draws in the browser. Trace attributes without a builder method
//! are set on the spec directly.
use plotly::Plot;
use serde_json::{Map, Value};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec(Value);

impl PlotSpec {
    pub fn from_plot(plot: &Plot) -> Result<Self> {
        let value: Value = serde_json::from_str(&plot.to_json())?;
        Ok(Self(value))
    }

    pub fn traces(&self) -> &[Value] {
        self.0
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn trace(&self, index: usize) -> Option<&Value> {
        self.traces().get(index)
    }

    pub fn layout(&self) -> &Value {
        self.0.get("layout").unwrap_or(&Value::Null)
    }

    /// Set `key` on the trace at `index`. Missing traces are ignored.
    pub fn set_trace_attr(&mut self, index: usize, key: &str, value: Value) {
        if let Some(Value::Object(trace)) = self
            .0
            .get_mut("data")
            .and_then(Value::as_array_mut)
            .and_then(|traces| traces.get_mut(index))
        {
            trace.insert(key.to_string(), value);
        }
    }

    pub fn set_layout_attr(&mut self, key: &str, value: Value) {
        if let Value::Object(root) = &mut self.0 {
            let layout = root
                .entry("layout")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(layout) = layout {
                layout.insert(key.to_string(), value);
            }
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// JSON safe to place inside a `<script>` element.
    pub fn to_embedded_json(&self) -> String {
        self.0.to_string().replace("</", "<\\/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotly::Bar;
    use serde_json::json;

    fn spec() -> PlotSpec {
        let mut plot = Plot::new();
        plot.add_trace(Bar::new(vec!["a".to_string()], vec![1.0]).name("</script>"));
        PlotSpec::from_plot(&plot).unwrap()
    }

    #[test]
    fn exposes_traces() {
        let spec = spec();
        assert_eq!(spec.traces().len(), 1);
        assert_eq!(spec.trace(0).unwrap()["type"], "bar");
        assert!(spec.trace(1).is_none());
    }

    #[test]
    fn attributes_are_set_in_place() {
        let mut spec = spec();
        spec.set_trace_attr(0, "customdata", json!([1.5]));
        spec.set_trace_attr(3, "ignored", json!(true));
        spec.set_layout_attr("barmode", json!("group"));
        assert_eq!(spec.trace(0).unwrap()["customdata"], json!([1.5]));
        assert_eq!(spec.layout()["barmode"], "group");
    }

    #[test]
    fn embedded_json_cannot_close_the_script() {
        let embedded = spec().to_embedded_json();
        assert!(!embedded.contains("</script>"));
        let back: Value = serde_json::from_str(&embedded).unwrap();
        assert_eq!(back["data"][0]["name"], "</script>");
    }
}
