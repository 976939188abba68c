//! Importer for JS self-profiling traces.
//!
//! A JS self-profiling trace is a flat table of frames, resources (source
//! files), parent-linked stack nodes, and timestamped samples. This crate
//! reconstructs one ordered call stack per sample by walking the parent
//! links, converts the timestamp sequence into wall-clock weights, and feeds
//! the resulting (stack, weight) pairs into a profile builder in
//! chronological order.
//!
//! # Modules
//!
//! - [`trace`] - the raw trace format: parsing and format detection
//! - [`import`] - stack reconstruction and timeline weighting
//! - [`profile`] - the builder seam and the default stack-list profile
//!
//! # Example
//!
//! ```no_run
//! use jsprofile::trace::JsProfileTrace;
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let reader = BufReader::new(File::open("trace.json").unwrap());
//! let trace = JsProfileTrace::from_reader(reader).unwrap();
//! let profile = jsprofile::import(&trace).unwrap();
//!
//! println!("total duration: {}", profile.total_duration);
//! println!("entries: {}", profile.entries.len());
//! ```

pub mod import;
pub mod profile;
pub mod trace;

pub use import::{ImportError, import, import_with, resolve_stack};
pub use profile::{FrameInfo, Profile, ProfileBuilder, StackListProfileBuilder, WeightedStack};
pub use trace::{JsProfileTrace, is_js_profile};
