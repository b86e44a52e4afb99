//! Breadth-first searches and the greedy labeling built on them.

/// breadth-first visitation order of a tree
pub mod traversal;

/// k-nearest-node and label-diverse neighborhoods
pub mod neighborhood;

/// greedy proximity labeling
pub mod greedy_labeling;
