use crate::{
    foundation::{core::SurfaceSize, error::WeaveResult},
    model::snapshot::Snapshot,
    render::backend::{FrameRGBA, WeaveBackend},
    sync::reconcile::Reconciler,
};

/// Cached snapshot plus its on-screen rendering.
///
/// Every accepted replacement and every resize re-renders the whole weave;
/// a reconciliation that keeps the cache does not render.
pub struct WeaveView {
    reconciler: Reconciler,
    backend: Box<dyn WeaveBackend>,
    surface: SurfaceSize,
    frame: Option<FrameRGBA>,
    renders: u64,
}

impl WeaveView {
    pub fn new(backend: Box<dyn WeaveBackend>, surface: SurfaceSize) -> WeaveResult<Self> {
        surface.validate()?;
        Ok(Self {
            reconciler: Reconciler::new(),
            backend,
            surface,
            frame: None,
            renders: 0,
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        self.reconciler.local()
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Last on-screen frame, if anything was rendered yet.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.frame.as_ref()
    }

    /// Number of on-screen renders performed.
    pub fn renders(&self) -> u64 {
        self.renders
    }

    /// Reconcile against `remote`; returns whether the cache was replaced.
    pub fn apply(&mut self, remote: Snapshot) -> WeaveResult<bool> {
        if !self.reconciler.apply(remote).should_update {
            return Ok(false);
        }
        self.redraw()?;
        Ok(true)
    }

    /// Resize the surface and redraw.
    pub fn resize(&mut self, surface: SurfaceSize) -> WeaveResult<()> {
        surface.validate()?;
        self.surface = surface;
        self.redraw()
    }

    /// Drop the cache after an administrative clear and redraw.
    pub fn clear(&mut self) -> WeaveResult<()> {
        self.reconciler.reset();
        self.redraw()
    }

    /// Render the current snapshot on an opaque background for export.
    /// Does not touch the on-screen frame.
    pub fn export_frame(&mut self) -> WeaveResult<FrameRGBA> {
        self.backend
            .render(self.reconciler.local(), self.surface, true)
    }

    fn redraw(&mut self) -> WeaveResult<()> {
        let frame = self
            .backend
            .render(self.reconciler.local(), self.surface, false)?;
        self.frame = Some(frame);
        self.renders += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/view.rs"]
mod tests;
