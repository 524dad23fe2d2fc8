use vello_cpu::kurbo::{Cap, Circle, Join, Rect, Shape, Stroke};

use crate::{
    color::css::parse_css_color,
    foundation::{
        core::{Affine, Point, Rgba8, SurfaceSize},
        error::{WeaveError, WeaveResult},
    },
    model::snapshot::Snapshot,
    render::{
        backend::{FrameRGBA, WeaveBackend, WeaveStyle},
        labels::{LABEL_SIZE_PX, LabelFont},
        weave::weave_segments,
    },
};

/// Drawn in place of colors that fail to parse.
const FALLBACK_COLOR: Rgba8 = Rgba8::new(0xd1, 0xd5, 0xdb, 0xff);
/// Radius of the word markers, logical units.
const POINT_RADIUS: f64 = 4.0;
/// Gap between a marker and the bottom of its label.
const LABEL_GAP: f64 = 4.0;

/// CPU rasterizer for the weave.
///
/// Keeps one backing pixmap and reallocates it only when the device pixel
/// size changes.
pub struct CpuBackend {
    style: WeaveStyle,
    labels: Option<LabelFont>,
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl CpuBackend {
    pub fn new(style: WeaveStyle) -> Self {
        Self {
            style,
            labels: None,
            surface: None,
        }
    }

    /// Font for word labels. Labels are only drawn with
    /// [`WeaveStyle::show_words`] set; without a font only markers are.
    pub fn with_label_font(mut self, font: LabelFont) -> Self {
        self.labels = Some(font);
        self
    }

    pub fn style(&self) -> &WeaveStyle {
        &self.style
    }

    pub fn label_font(&self) -> Option<&LabelFont> {
        self.labels.as_ref()
    }

    fn ensure_surface(&mut self, size: SurfaceSize) -> WeaveResult<CpuSurface> {
        let (width, height) = size.pixel_dims()?;
        match self.surface.take() {
            Some(s) if s.width == width && s.height == height => Ok(s),
            _ => {
                tracing::debug!(width, height, "allocating weave surface");
                Ok(CpuSurface {
                    width,
                    height,
                    pixmap: vello_cpu::Pixmap::new(width, height),
                })
            }
        }
    }

    /// Markers, then labels on top, in creation order.
    fn draw_words(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        snapshot: &Snapshot,
        size: SurfaceSize,
    ) -> WeaveResult<()> {
        let device = size.device_transform();
        ctx.set_transform(affine_to_cpu(device));
        for word in snapshot.chronological() {
            set_color(ctx, word_color(&word.color));
            let center = point_to_cpu(size.project(word.x, word.y));
            ctx.fill_path(&Circle::new(center, POINT_RADIUS).to_path(0.1));
        }

        let Some(font) = &self.labels else {
            return Ok(());
        };
        let mut layouter = font.layouter()?;
        for word in snapshot.chronological() {
            let layout = layouter.layout(&word.text, LABEL_SIZE_PX, word_color(&word.color));
            let anchor = size.project(word.x, word.y);
            let origin = Affine::translate((
                anchor.x - f64::from(layout.width()) / 2.0,
                anchor.y - POINT_RADIUS - LABEL_GAP - f64::from(layout.height()),
            ));
            ctx.set_transform(affine_to_cpu(device * origin));

            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    set_color(ctx, run.style().brush);
                    let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(font.font_data())
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
        }
        Ok(())
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new(WeaveStyle::default())
    }
}

impl WeaveBackend for CpuBackend {
    fn render(
        &mut self,
        snapshot: &Snapshot,
        size: SurfaceSize,
        opaque_background: bool,
    ) -> WeaveResult<FrameRGBA> {
        if !(self.style.stroke_width.is_finite() && self.style.stroke_width > 0.0) {
            return Err(WeaveError::render("stroke width must be > 0"));
        }
        let mut surface = self.ensure_surface(size)?;
        clear_pixmap(&mut surface.pixmap);

        let segments = weave_segments(snapshot, size);
        let show_words = self.style.show_words && !snapshot.is_empty();
        if opaque_background || !segments.is_empty() || show_words {
            // Everything, background included, goes through the context:
            // rasterizing replaces the pixmap contents.
            let mut ctx = vello_cpu::RenderContext::new(surface.width, surface.height);
            if opaque_background {
                set_color(&mut ctx, self.style.background);
                ctx.fill_rect(&Rect::new(
                    0.0,
                    0.0,
                    f64::from(surface.width),
                    f64::from(surface.height),
                ));
            }

            ctx.set_transform(affine_to_cpu(size.device_transform()));
            ctx.set_stroke(
                Stroke::new(self.style.stroke_width)
                    .with_caps(Cap::Round)
                    .with_join(Join::Round),
            );
            for seg in &segments {
                set_color(
                    &mut ctx,
                    word_color(&seg.color).with_opacity(self.style.stroke_opacity),
                );
                let mut path = vello_cpu::kurbo::BezPath::new();
                path.move_to(point_to_cpu(seg.from));
                path.line_to(point_to_cpu(seg.to));
                ctx.stroke_path(&path);
            }

            if show_words {
                self.draw_words(&mut ctx, snapshot, size)?;
            }
            ctx.flush();
            ctx.render_to_pixmap(&mut surface.pixmap);
        }

        let frame = FrameRGBA {
            width: u32::from(surface.width),
            height: u32::from(surface.height),
            data: surface.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        };
        self.surface = Some(surface);
        Ok(frame)
    }
}

fn word_color(raw: &str) -> Rgba8 {
    parse_css_color(raw).unwrap_or_else(|e| {
        tracing::warn!(color = %raw, error = %e, "unparseable word color");
        FALLBACK_COLOR
    })
}

fn set_color(ctx: &mut vello_cpu::RenderContext, c: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a));
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
