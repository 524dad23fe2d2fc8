use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::error::{WeaveError, WeaveResult},
    render::backend::FrameRGBA,
};

/// Straight-alpha RGBA8 copy of `frame`.
pub fn unpremultiply(frame: &FrameRGBA) -> Vec<u8> {
    if !frame.premultiplied {
        return frame.data.clone();
    }
    let mut out = frame.data.clone();
    for px in out.chunks_exact_mut(4) {
        let a = px[3];
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8;
        }
    }
    out
}

/// Write `frame` as a PNG, creating parent directories.
pub fn export_png(frame: &FrameRGBA, path: &Path) -> WeaveResult<()> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(WeaveError::render(format!(
            "frame byte length {} does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    image::save_buffer_with_format(
        path,
        &unpremultiply(frame),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;

    tracing::info!(path = %path.display(), "weave exported");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
