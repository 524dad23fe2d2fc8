use crate::{
    foundation::core::{Point, SurfaceSize},
    model::snapshot::Snapshot,
};

/// One stroke of the weave, in logical surface units.
#[derive(Clone, Debug, PartialEq)]
pub struct WeaveSegment {
    pub from: Point,
    pub to: Point,
    /// Color of the newer endpoint.
    pub color: String,
}

/// Segments joining consecutive entries in creation order.
///
/// Empty for 0 or 1 entries; `n - 1` segments otherwise.
pub fn weave_segments(snapshot: &Snapshot, surface: SurfaceSize) -> Vec<WeaveSegment> {
    let ordered: Vec<_> = snapshot.chronological().collect();
    ordered
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (pair[0], pair[1]);
            WeaveSegment {
                from: surface.project(prev.x, prev.y),
                to: surface.project(curr.x, curr.y),
                color: curr.color.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/weave.rs"]
mod tests;
