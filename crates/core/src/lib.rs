mod error;
mod geometry;
mod loops;
mod parser;
mod types;

pub use error::LayoutError;
pub use loops::decompose;
pub use parser::parse;
pub use types::*;

/// Compute the full layout (placed loops and bases) for a dot-bracket
/// structure.
pub fn layout(structure: &str) -> Result<Layout, LayoutError> {
    let pt = parser::parse(structure)?;
    if pt.n_bases == 0 {
        return Err(LayoutError::EmptyStructure);
    }
    let loop_infos = loops::decompose(&pt);
    let (loops, bases) = geometry::place(&loop_infos, &pt);
    Ok(Layout { bases, loops })
}

/// Main entry point: per-nucleotide plotting coordinates for a dot-bracket
/// structure.
///
/// Returns three parallel arrays (x, y, arc) with one entry per structure
/// position. Callers should treat the values as opaque; `arc` is the base's
/// angular position on its loop circle, used to draw curved backbone
/// connections.
pub fn plot_coords(structure: &str) -> Result<PlotCoords, LayoutError> {
    let l = layout(structure)?;
    Ok(PlotCoords {
        arc: l.bases.iter().map(|b| b.angle).collect(),
        x: l.bases.iter().map(|b| b.x).collect(),
        y: l.bases.iter().map(|b| b.y).collect(),
    })
}
