//! The JS self-profiling trace format.
//!
//! A trace is a single JSON object with four flat tables:
//!
//! - `frames`: call-stack locations (`line`, `column`, `name`, `resourceId`)
//! - `resources`: source identifiers (file paths or URLs), referenced by index
//! - `stacks`: parent-linked stack nodes forming a call tree shared across
//!   all samples
//! - `samples`: timestamped observations of the active leaf stack node
//!
//! Stack references (`stackId` on samples, `parentId` on stack nodes) are
//! 1-based indices into `stacks`; `0` or an absent field is the sentinel
//! meaning "no stack" / "no parent".

use serde::Deserialize;
use std::io::Read;

use crate::import::Result;

/// A single call-stack location.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsProfileFrame {
    /// Line in the resource, 1-based.
    pub line: u32,
    /// Column in the resource, 1-based.
    pub column: u32,
    /// Display label, e.g. a method name.
    pub name: String,
    /// Index into the trace's `resources` table.
    pub resource_id: usize,
}

/// A node in the shared call-stack tree.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsProfileStack {
    /// Index into the trace's `frames` table.
    pub frame_id: usize,
    /// 1-based reference to the parent stack node; 0 or absent for the root.
    #[serde(default)]
    pub parent_id: usize,
}

impl JsProfileStack {
    /// Index of the parent node in the `stacks` table, or `None` at the root.
    pub fn parent_index(&self) -> Option<usize> {
        self.parent_id.checked_sub(1)
    }
}

/// One timestamped observation of the active call stack.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsProfileSample {
    /// Monotonically non-decreasing timestamp, in milliseconds.
    pub timestamp: f64,
    /// 1-based reference to the leaf stack node; 0 or absent means the
    /// sample caught no active stack.
    #[serde(default)]
    pub stack_id: usize,
}

impl JsProfileSample {
    /// Index of the leaf stack node in the `stacks` table, or `None` when
    /// the sample is stackless.
    pub fn stack_index(&self) -> Option<usize> {
        self.stack_id.checked_sub(1)
    }
}

/// A complete JS self-profiling trace.
///
/// Read-only for the duration of an import; the importer never mutates it.
#[derive(Debug, Clone, Deserialize)]
pub struct JsProfileTrace {
    pub frames: Vec<JsProfileFrame>,
    pub resources: Vec<String>,
    pub stacks: Vec<JsProfileStack>,
    pub samples: Vec<JsProfileSample>,
}

impl JsProfileTrace {
    /// Parse a trace from any `Read`-able source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let trace = serde_json::from_reader(reader)?;
        Ok(trace)
    }
}

/// Report whether a parsed JSON value looks like a JS self-profiling trace.
///
/// The format is accepted only if all four top-level tables are present;
/// otherwise this importer declines and an outer dispatcher can hand the
/// input to another format handler.
pub fn is_js_profile(value: &serde_json::Value) -> bool {
    value.get("frames").is_some()
        && value.get("resources").is_some()
        && value.get("stacks").is_some()
        && value.get("samples").is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_trace() -> &'static str {
        r#"{
            "frames": [
                {"line": 10, "column": 1, "name": "main", "resourceId": 0},
                {"line": 25, "column": 5, "name": "render", "resourceId": 1}
            ],
            "resources": ["app.js", "view.js"],
            "stacks": [
                {"frameId": 0},
                {"frameId": 1, "parentId": 1}
            ],
            "samples": [
                {"timestamp": 0.0, "stackId": 2},
                {"timestamp": 1.5, "stackId": 0},
                {"timestamp": 3.0}
            ]
        }"#
    }

    #[test]
    fn parse_trace() {
        let trace = JsProfileTrace::from_reader(Cursor::new(sample_trace())).unwrap();

        assert_eq!(trace.frames.len(), 2);
        assert_eq!(trace.resources, vec!["app.js", "view.js"]);
        assert_eq!(trace.stacks.len(), 2);
        assert_eq!(trace.samples.len(), 3);

        assert_eq!(trace.frames[0].name, "main");
        assert_eq!(trace.frames[1].resource_id, 1);
    }

    #[test]
    fn parent_index_sentinel() {
        let trace = JsProfileTrace::from_reader(Cursor::new(sample_trace())).unwrap();

        // First node is the root: parentId absent
        assert_eq!(trace.stacks[0].parent_index(), None);
        // Second node points at the first (1-based)
        assert_eq!(trace.stacks[1].parent_index(), Some(0));
    }

    #[test]
    fn stack_index_sentinel() {
        let trace = JsProfileTrace::from_reader(Cursor::new(sample_trace())).unwrap();

        assert_eq!(trace.samples[0].stack_index(), Some(1));
        // Explicit 0 and absent both mean "no stack"
        assert_eq!(trace.samples[1].stack_index(), None);
        assert_eq!(trace.samples[2].stack_index(), None);
    }

    #[test]
    fn detects_js_profile() {
        let value: serde_json::Value = serde_json::from_str(sample_trace()).unwrap();
        assert!(is_js_profile(&value));
    }

    #[test]
    fn declines_other_formats() {
        // A V8 cpuprofile has "nodes", not the four JS profile tables
        let value: serde_json::Value =
            serde_json::from_str(r#"{"nodes": [], "samples": [], "timeDeltas": []}"#).unwrap();
        assert!(!is_js_profile(&value));

        let value: serde_json::Value =
            serde_json::from_str(r#"{"frames": [], "resources": [], "stacks": []}"#).unwrap();
        assert!(!is_js_profile(&value));
    }

    #[test]
    fn rejects_malformed_json() {
        let result = JsProfileTrace::from_reader(Cursor::new("{not json"));
        assert!(result.is_err());
    }
}
