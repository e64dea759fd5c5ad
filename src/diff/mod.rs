//! Pairwise sequence diff.
//!
//! Both algorithms produce an edit script: every element of `old` appears
//! once as `Common` or `Removed`, every element of `new` once as `Common` or
//! `Added`, in order. Reading the script top to bottom with additions
//! skipped rebuilds `old`; with removals skipped it rebuilds `new`.

use std::fmt;
use std::str::FromStr;

pub mod lcs;
pub mod myers;

/// One step of an edit script. Indices point into the original sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Edit<T> {
    Common { old: usize, new: usize, item: T },
    Added { new: usize, item: T },
    Removed { old: usize, item: T },
}

impl<T> Edit<T> {
    pub fn item(&self) -> &T {
        match self {
            Edit::Common { item, .. } => item,
            Edit::Added { item, .. } => item,
            Edit::Removed { item, .. } => item,
        }
    }

    pub fn old_index(&self) -> Option<usize> {
        match self {
            Edit::Common { old, .. } | Edit::Removed { old, .. } => Some(*old),
            Edit::Added { .. } => None,
        }
    }

    pub fn new_index(&self) -> Option<usize> {
        match self {
            Edit::Common { new, .. } | Edit::Added { new, .. } => Some(*new),
            Edit::Removed { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Edit::Common { .. } => "common",
            Edit::Added { .. } => "added",
            Edit::Removed { .. } => "removed",
        }
    }
}

/// Which diff algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Longest common subsequence table walk. O(nm) time and space.
    #[default]
    Lcs,
    /// Myers greedy shortest edit script. O((n+m)d) time.
    Myers,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Lcs => f.write_str("lcs"),
            Algorithm::Myers => f.write_str("myers"),
        }
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown diff algorithm {:?} (expected lcs or myers)", self.0)
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lcs" => Ok(Algorithm::Lcs),
            "myers" => Ok(Algorithm::Myers),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Diff `old` against `new` with the chosen algorithm.
pub fn diff<'a, T: PartialEq>(old: &'a [T], new: &'a [T], algorithm: Algorithm) -> Vec<Edit<&'a T>> {
    match algorithm {
        Algorithm::Lcs => lcs::diff(old, new),
        Algorithm::Myers => myers::diff(old, new),
    }
}

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";

/// Render a script one line per edit: `"  "` for common, `"+ "` for added,
/// `"- "` for removed. With `color`, lines are wrapped in ANSI escapes.
pub fn render<T: fmt::Display>(edits: &[Edit<T>], color: bool) -> String {
    let mut out = String::new();
    for edit in edits {
        let (marker, paint) = match edit {
            Edit::Common { .. } => ("  ", YELLOW),
            Edit::Added { .. } => ("+ ", GREEN),
            Edit::Removed { .. } => ("- ", RED),
        };
        if color {
            out.push_str(&format!("{}{}{}{}\n", paint, marker, edit.item(), RESET));
        } else {
            out.push_str(&format!("{}{}\n", marker, edit.item()));
        }
    }
    out
}
