//! The profile-builder seam and the default stack-list profile.
//!
//! The importer does not own the aggregated profile model; it only
//! guarantees the order and weights of the entries it feeds into a builder.
//! [`ProfileBuilder`] captures that collaborator contract, and
//! [`StackListProfileBuilder`] is the concrete implementation used by the
//! CLI and by callers without their own aggregator.

use serde::Serialize;

/// A resolved call-stack frame descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameInfo {
    /// Identity key for deduplication and coloring: `"{file}:{line}:{col}"`.
    pub key: String,
    /// Name of the frame. May be a method name, e.g. "ActiveRecord##to_hash".
    pub name: String,
    /// File path of the code corresponding to this frame.
    pub file: String,
    /// Line in the given file, 1-based.
    pub line: u32,
    /// Column in the file, 1-based.
    pub col: u32,
}

/// Collaborator contract for profile aggregation.
///
/// Entries are appended strictly in chronological order; each append depends
/// on the builder's accumulated state, so calls must not be reordered.
pub trait ProfileBuilder {
    /// The finished profile type this builder produces.
    type Profile;

    /// Append one weighted entry. An empty stack represents idle time.
    fn append_sample_with_weight(&mut self, stack: Vec<FrameInfo>, weight: f64);

    /// Finalize and return the built profile.
    fn build(self) -> Self::Profile;
}

/// An ordered root-to-leaf stack paired with a wall-clock weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedStack {
    pub stack: Vec<FrameInfo>,
    pub weight: f64,
}

/// A time-ordered list of weighted stacks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    /// Declared total duration, `last.timestamp - first.timestamp`.
    pub total_duration: f64,
    pub entries: Vec<WeightedStack>,
}

/// Builder that accumulates entries into a [`Profile`] in append order.
#[derive(Debug, Clone)]
pub struct StackListProfileBuilder {
    total_duration: f64,
    entries: Vec<WeightedStack>,
}

impl StackListProfileBuilder {
    /// Create a builder for a profile with the given total duration.
    pub fn new(total_duration: f64) -> Self {
        Self {
            total_duration,
            entries: Vec::new(),
        }
    }
}

impl ProfileBuilder for StackListProfileBuilder {
    type Profile = Profile;

    fn append_sample_with_weight(&mut self, stack: Vec<FrameInfo>, weight: f64) {
        self.entries.push(WeightedStack { stack, weight });
    }

    fn build(self) -> Profile {
        Profile {
            total_duration: self.total_duration,
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(name: &str) -> FrameInfo {
        FrameInfo {
            key: format!("test.js:1:1#{name}"),
            name: name.to_string(),
            file: "test.js".to_string(),
            line: 1,
            col: 1,
        }
    }

    #[test]
    fn preserves_append_order() {
        let mut builder = StackListProfileBuilder::new(10.0);
        builder.append_sample_with_weight(vec![frame("a")], 4.0);
        builder.append_sample_with_weight(vec![], 1.0);
        builder.append_sample_with_weight(vec![frame("b")], 5.0);

        let profile = builder.build();
        assert_eq!(profile.total_duration, 10.0);
        assert_eq!(profile.entries.len(), 3);
        assert_eq!(profile.entries[0].stack[0].name, "a");
        assert!(profile.entries[1].stack.is_empty());
        assert_eq!(profile.entries[2].weight, 5.0);
    }

    #[test]
    fn empty_builder_builds_empty_profile() {
        let profile = StackListProfileBuilder::new(0.0).build();
        assert_eq!(profile.total_duration, 0.0);
        assert!(profile.entries.is_empty());
    }
}
