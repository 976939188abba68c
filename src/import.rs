//! Stack reconstruction and timeline weighting.
//!
//! The importer runs in two stages over an immutable trace, single-threaded
//! and in one pass:
//!
//! 1. **Stack reconstruction** ([`resolve_stack`]): walk the parent links of
//!    a sample's leaf stack node through the shared stack-node table and
//!    return the resolved frames ordered root-first.
//! 2. **Timeline weighting** ([`import_with`]): turn the absolute timestamp
//!    sequence into per-sample wall-clock weights and feed each (stack,
//!    weight) entry into a [`ProfileBuilder`] in chronological order.

use thiserror::Error;

use crate::profile::{FrameInfo, Profile, ProfileBuilder, StackListProfileBuilder};
use crate::trace::{JsProfileSample, JsProfileTrace};

/// Errors that can occur while importing a trace.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no samples found in trace")]
    EmptyTrace,

    #[error("stack id {0} is out of range")]
    InvalidStackId(usize),

    #[error("frame id {0} is out of range")]
    InvalidFrameId(usize),

    #[error("resource id {0} is out of range")]
    InvalidResourceId(usize),

    #[error("parent chain of stack id {0} does not terminate")]
    CyclicStacks(usize),
}

/// Result type for import operations.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Gaps at or below this threshold are clock noise, not idle time.
///
/// Safari reports adjacent timestamps that overlap or drift apart by a few
/// microseconds; rendering those as idle intervals would litter the profile
/// with phantom gaps.
const IDLE_EPSILON: f64 = 0.002;

/// Reconstruct the ordered call stack observed by one sample.
///
/// Returns the resolved frames ordered root-first, leaf-last, or an empty
/// vector for a stackless (idle) sample. Pure function of the trace's static
/// tables and the sample.
///
/// The parent walk is iterative and bounded by the stack-table length: a
/// chain longer than the table must have revisited a node, so the walk fails
/// with [`ImportError::CyclicStacks`] instead of looping forever.
pub fn resolve_stack(trace: &JsProfileTrace, sample: &JsProfileSample) -> Result<Vec<FrameInfo>> {
    let Some(leaf) = sample.stack_index() else {
        return Ok(Vec::new());
    };

    let mut stack = Vec::new();
    let mut current = Some(leaf);

    while let Some(index) = current {
        if stack.len() >= trace.stacks.len() {
            return Err(ImportError::CyclicStacks(sample.stack_id));
        }
        let node = trace
            .stacks
            .get(index)
            .ok_or(ImportError::InvalidStackId(index + 1))?;
        let frame = trace
            .frames
            .get(node.frame_id)
            .ok_or(ImportError::InvalidFrameId(node.frame_id))?;
        let file = trace
            .resources
            .get(frame.resource_id)
            .ok_or(ImportError::InvalidResourceId(frame.resource_id))?;

        stack.push(FrameInfo {
            key: format!("{}:{}:{}", file, frame.line, frame.column),
            name: frame.name.clone(),
            file: file.clone(),
            line: frame.line,
            col: frame.column,
        });
        current = node.parent_index();
    }

    // The walk collects leaf-first; consumers want root-first.
    stack.reverse();
    Ok(stack)
}

/// Import a trace, feeding weighted entries into a caller-supplied builder.
///
/// `make_builder` receives the total trace duration
/// (`last.timestamp - first.timestamp`) and returns the builder; entries are
/// then appended strictly in chronological order and the finished profile is
/// returned from the builder.
///
/// A trace with no samples fails with [`ImportError::EmptyTrace`]. A
/// single-sample trace is accepted: total duration 0, one entry weighted by
/// the sample's own timestamp.
pub fn import_with<B, F>(trace: &JsProfileTrace, make_builder: F) -> Result<B::Profile>
where
    B: ProfileBuilder,
    F: FnOnce(f64) -> B,
{
    let first = trace.samples.first().ok_or(ImportError::EmptyTrace)?;
    let last = trace.samples.last().ok_or(ImportError::EmptyTrace)?;
    let mut builder = make_builder(last.timestamp - first.timestamp);

    // Starts at 0, not at the first sample's timestamp: a lead-in gap before
    // the first sample is charged to that sample's weight, so the weights
    // always sum to the last timestamp.
    let mut previous_end_time = 0.0;

    for sample in &trace.samples {
        let end_time = sample.timestamp;
        // Measured from the running end time, not between consecutive
        // timestamps by index; in steady state these coincide.
        let duration = sample.timestamp - previous_end_time;
        let start_time = end_time - duration;
        let idle_duration_before = start_time - previous_end_time;

        if idle_duration_before > IDLE_EPSILON {
            builder.append_sample_with_weight(Vec::new(), idle_duration_before);
        }

        builder.append_sample_with_weight(resolve_stack(trace, sample)?, duration);
        previous_end_time = end_time;
    }

    Ok(builder.build())
}

/// Import a trace into the default [`Profile`] via [`StackListProfileBuilder`].
pub fn import(trace: &JsProfileTrace) -> Result<Profile> {
    import_with(trace, StackListProfileBuilder::new)
}
