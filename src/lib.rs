//! Greedy distance-k proximity labeling of trees, with its validity checker and
//! proximity-ratio auditor.

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// error type of the crate
pub mod error;

/// tree instances
pub mod tree;

/// labelings and validity checker
pub mod labeling;

/// read/write DIMACS-like tree files
pub mod dimacs;

/// searches: traversal, neighborhoods and the greedy labeling
pub mod search;

/// eccentricity and proximity-ratio audit
pub mod proximity;

/// batches of instances and solutions, batch driver
pub mod batch;

/// Graphviz export of labeled trees
pub mod dot;

/// random and fixed-shape trees
pub mod gens;

/// helper and utility methods for executables
pub mod util;

pub use error::{ProximityError, Result};
pub use labeling::{validate, Label, Labeling, ValidityIssue};
pub use proximity::{audit, audit_report, eccentricity, ProximityReport};
pub use search::greedy_labeling::greedy_labeling;
pub use search::neighborhood::{count_neighborhood, label_neighborhood};
pub use search::traversal::bfs_order;
pub use tree::{TreeInstance, VertexId};
