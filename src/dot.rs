//! # Dot
//!
//! Writes a labeled tree in the Dot-Format of [GraphViz](https://graphviz.org/): one node per
//! tree node, filled with the color of its label, and one undirected edge per tree edge.
//! ```ignore
//! let mut out = std::fs::File::create("tree.dot")?;
//! write_dot(&inst, &labels, &mut out)?;
//! ```
//! Colors cycle through a fixed palette when there are more labels than colors.
use std::io::Write;

use crate::error::{ProximityError, Result};
use crate::labeling::Label;
use crate::tree::TreeInstance;

/// fill colors, indexed by label (modulo the palette size)
const PALETTE: [&str; 12] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
    "#e377c2", "#7f7f7f", "#bcbd22", "#17becf", "#aec7e8", "#ffbb78",
];

/// fill color of a label
pub fn label_color(label:Label) -> &'static str {
    PALETTE[label % PALETTE.len()]
}

/** writes the tree, its nodes colored by their labels, to `writer`.
fails with `InvalidInput` if there is not exactly one label per node.
*/
pub fn write_dot<W:Write>(inst:&TreeInstance, labels:&[Label], writer:&mut W) -> Result<()> {
    if labels.len() != inst.nb_vertices() {
        return Err(ProximityError::InvalidInput(format!(
            "tree has {} nodes, but {} labels were given", inst.nb_vertices(), labels.len()
        )));
    }
    writeln!(writer, "graph {{")?;
    writeln!(writer, "node [style=filled, fontcolor=white];")?;
    for (v,l) in labels.iter().enumerate() {
        writeln!(writer, "u{} [label=\"{} ({})\", fillcolor=\"{}\"];", v, v, l, label_color(*l))?;
    }
    for (a,b) in inst.edges() {
        writeln!(writer, "u{}--u{};", a, b)?;
    }
    writeln!(writer, "}}")?;
    Ok(())
}

/// Dot-Format of the labeled tree, as a string
pub fn dot_string(inst:&TreeInstance, labels:&[Label]) -> Result<String> {
    let mut buffer:Vec<u8> = Vec::new();
    write_dot(inst, labels, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ProximityError::Parse(e.to_string()))
}
