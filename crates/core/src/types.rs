use serde::Serialize;

/// Pair table from parsing dot-bracket notation
#[derive(Debug)]
pub struct PairTable {
    /// pairs[i] = j means base i is paired with base j; pairs[i] = i means unpaired
    pub pairs: Vec<usize>,
    pub n_bases: usize,
}

/// A pair entry within a loop
#[derive(Serialize, Clone, Debug)]
pub struct LoopPair {
    pub angle: f64,
    pub first: usize,
    pub last: usize,
    pub neighbor: usize,
}

/// Loop circle geometry (fields in alphabetical order for JSON output)
#[derive(Serialize, Clone, Debug)]
pub struct Loop {
    pub arc_angle: f64,
    pub height: f64,
    pub pair_angle: f64,
    pub pairs: Vec<LoopPair>,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
}

/// A placed base (fields in alphabetical order for JSON output)
#[derive(Serialize, Clone, Debug)]
pub struct Base {
    /// Angular position on the owning loop circle (radians)
    pub angle: f64,
    pub loop_index: usize,
    pub x: f64,
    pub y: f64,
}

/// Layout containing loops and bases
#[derive(Serialize, Clone, Debug)]
pub struct Layout {
    pub bases: Vec<Base>,
    pub loops: Vec<Loop>,
}

/// Per-nucleotide coordinates as three parallel arrays, one entry per
/// structure position. `arc` is the base's angular position on its loop
/// circle, the auxiliary value renderers use for curved backbone connections.
#[derive(Serialize, Clone, Debug)]
pub struct PlotCoords {
    pub arc: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl PlotCoords {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Internal loop info used during decomposition (not serialized)
#[derive(Debug, Clone)]
pub struct LoopInfo {
    /// The pair that creates this loop (parent pair). None for the exterior loop.
    pub parent_pair: Option<(usize, usize)>,
    /// Child pairs contained directly in this loop: (base_i, base_j) where i < j
    pub child_pairs: Vec<(usize, usize)>,
    /// Unpaired bases directly in this loop
    pub unpaired_bases: Vec<usize>,
}
