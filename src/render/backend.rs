use crate::{
    foundation::{
        core::{Rgba8, SurfaceSize},
        error::WeaveResult,
    },
    model::snapshot::Snapshot,
};

/// Background used for exports, `#111827`.
pub const DEFAULT_BACKGROUND: Rgba8 = Rgba8::new(0x11, 0x18, 0x27, 0xff);

/// Rendered pixels, row-major.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Premultiplied RGBA of the pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }
}

/// Stroke, marker and background parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeaveStyle {
    /// Fill used when an opaque background is requested.
    pub background: Rgba8,
    /// Stroke width in logical surface units.
    pub stroke_width: f64,
    /// Segment opacity, 0..1.
    pub stroke_opacity: f64,
    /// Also draw a marker, and a label when a font is loaded, at every word.
    pub show_words: bool,
}

impl Default for WeaveStyle {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            stroke_width: 2.0,
            stroke_opacity: 0.8,
            show_words: false,
        }
    }
}

/// Redraws a whole snapshot onto a surface.
///
/// Rendering is a pure function of its inputs; callers re-invoke it on
/// every data change and every resize.
pub trait WeaveBackend: Send {
    fn render(
        &mut self,
        snapshot: &Snapshot,
        surface: SurfaceSize,
        opaque_background: bool,
    ) -> WeaveResult<FrameRGBA>;
}
