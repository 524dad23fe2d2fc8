use std::borrow::Cow;

use crate::foundation::{
    core::Rgba8,
    error::{WeaveError, WeaveResult},
};

/// Logical font size of word labels.
pub const LABEL_SIZE_PX: f32 = 18.0;

/// Font used to draw word labels, loaded from raw font bytes.
#[derive(Clone)]
pub struct LabelFont {
    bytes: Vec<u8>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("family", &self.family)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl LabelFont {
    pub fn from_bytes(bytes: Vec<u8>) -> WeaveResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register(&mut font_ctx, &bytes)?;
        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.clone()), 0);
        Ok(Self {
            bytes,
            family,
            font,
        })
    }

    pub fn from_path(path: &std::path::Path) -> WeaveResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            WeaveError::validation(format!("read label font '{}': {e}", path.display()))
        })?;
        Self::from_bytes(bytes)
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Fresh shaping contexts with this font registered.
    pub(crate) fn layouter(&self) -> WeaveResult<LabelLayouter<'_>> {
        let mut font_ctx = parley::FontContext::default();
        register(&mut font_ctx, &self.bytes)?;
        Ok(LabelLayouter {
            font: self,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
        })
    }
}

pub(crate) struct LabelLayouter<'a> {
    font: &'a LabelFont,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
}

impl LabelLayouter<'_> {
    /// Single-line layout of `text`, brushed with `color`.
    pub(crate) fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        color: Rgba8,
    ) -> parley::Layout<Rgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

fn register(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> WeaveResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| WeaveError::validation("no font families registered from font bytes"))?;
    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_owned)
        .ok_or_else(|| WeaveError::validation("registered font family has no name"))
}
