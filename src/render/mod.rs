//! Weave rendering: geometry, CPU rasterization and PNG export.

/// Backend trait, style and frame type.
pub mod backend;
/// `vello_cpu` rasterizer.
pub mod cpu;
/// PNG export of rendered frames.
pub mod export;
/// Word label fonts and shaping.
pub mod labels;
/// Pure weave geometry.
pub mod weave;
