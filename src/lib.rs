//! Kaleido - a ranked skip list and a few small algorithms around it.
//!
//! # Quick Start
//!
//! ```
//! use kaleido::collections::SkipList;
//!
//! let mut scores = SkipList::seeded(7);
//! scores.insert(120.0, "carol");
//! scores.insert(95.5, "alice");
//! scores.insert(101.0, "bob");
//!
//! assert_eq!(scores.rank(101.0, &"bob"), 2);
//! assert_eq!(scores.element_at_rank(3).map(|n| *n.value()), Some("carol"));
//! assert!(scores.delete(95.5, &"alice"));
//! assert_eq!(scores.len(), 2);
//! ```
//!
//! # Modules
//!
//! - `collections::skip_list`: `(score, value)` skip list with rank queries
//! - `collections::top_k`: bounded best-of-k selection on `collections::heap`
//! - `diff`: LCS and Myers edit scripts over slices

pub mod collections;
pub mod diff;
