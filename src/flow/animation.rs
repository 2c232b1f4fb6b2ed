use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace, warn};

use crate::core::Viewport;
use crate::error::VizResult;
use crate::host::{FrameHost, FrameRequestId, ListenerId, ListenerKind, SurfaceId};
use crate::render::RenderFrame;

use super::{FlowLineConfig, LineDescriptor, project_lines};

/// Frame-driven flow-line loop bound to one host surface.
#[derive(Debug)]
pub struct FlowLineAnimation {
    config: FlowLineConfig,
    lines: Vec<LineDescriptor>,
    time: f64,
    viewport: Viewport,
    surface: Option<SurfaceId>,
    frame: Option<FrameRequestId>,
    resize_listener: Option<ListenerId>,
}

impl FlowLineAnimation {
    pub fn new<R: Rng + ?Sized>(config: FlowLineConfig, rng: &mut R) -> VizResult<Self> {
        config.validate()?;
        let lines = (0..config.count)
            .map(|i| LineDescriptor::generate(&mut *rng, config.style, i, config.count))
            .collect();
        Ok(Self {
            config,
            lines,
            time: 0.0,
            viewport: Viewport::new(0, 0),
            surface: None,
            frame: None,
            resize_listener: None,
        })
    }

    pub fn with_seed(config: FlowLineConfig, seed: u64) -> VizResult<Self> {
        Self::new(config, &mut StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn config(&self) -> &FlowLineConfig {
        &self.config
    }

    #[must_use]
    pub fn lines(&self) -> &[LineDescriptor] {
        &self.lines
    }

    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.frame.is_some()
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<FrameRequestId> {
        self.frame
    }

    /// Mounts the surface, listens for resizes and draws the first frame.
    pub fn start<H: FrameHost + ?Sized>(&mut self, host: &mut H, viewport: Viewport) -> VizResult<()> {
        if self.surface.is_some() {
            self.stop(host);
        }
        let surface = host.mount_surface(&self.config.mount, viewport)?;
        self.surface = Some(surface);
        self.viewport = viewport;
        self.resize_listener = Some(host.add_listener(ListenerKind::Resize, None));
        debug!(
            mount = %self.config.mount,
            style = ?self.config.style,
            lines = self.lines.len(),
            "starting flow lines"
        );
        self.animate(host, surface);
        Ok(())
    }

    /// Delivers a frame callback; stale requests are ignored.
    pub fn on_frame<H: FrameHost + ?Sized>(&mut self, host: &mut H, request: FrameRequestId) -> bool {
        let Some(surface) = self.surface else {
            return false;
        };
        if self.frame != Some(request) {
            trace!(request = request.0, "ignoring stale flow frame");
            return false;
        }
        self.animate(host, surface);
        true
    }

    /// Adopts the new container size; the next frame draws at that size.
    pub fn on_resize<H: FrameHost + ?Sized>(&mut self, host: &mut H, viewport: Viewport) {
        let Some(surface) = self.surface else {
            return;
        };
        self.viewport = viewport;
        host.resize_surface(surface, viewport);
    }

    /// Cancels the pending frame, then drops the resize listener and surface.
    pub fn stop<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(request) = self.frame.take() {
            host.cancel_frame(request);
        }
        if let Some(listener) = self.resize_listener.take() {
            host.remove_listener(listener);
        }
        if let Some(surface) = self.surface.take() {
            debug!(mount = %self.config.mount, "stopped flow lines");
            host.unmount_surface(surface);
        }
    }

    /// Advances the clock by one frame and returns the redraw.
    pub fn tick(&mut self) -> RenderFrame {
        self.time += self.config.style.time_step();
        project_lines(&self.lines, self.viewport, self.time, &self.config)
    }

    fn animate<H: FrameHost + ?Sized>(&mut self, host: &mut H, surface: SurfaceId) {
        let frame = self.tick();
        if self.viewport.is_valid() {
            if let Err(err) = host.present(surface, &frame) {
                warn!(error = %err, "failed to present flow lines");
            }
        }
        self.frame = Some(host.request_frame());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::FlowLineStyle;

    #[test]
    fn tick_advances_time_per_style() {
        let mut vertical = FlowLineAnimation::with_seed(FlowLineConfig::vertical(), 1).expect("new");
        let mut curved = FlowLineAnimation::with_seed(FlowLineConfig::curved(), 1).expect("new");
        vertical.viewport = Viewport::new(400, 300);
        curved.viewport = Viewport::new(400, 300);
        for _ in 0..10 {
            vertical.tick();
            curved.tick();
        }
        assert!((vertical.time() - 0.1).abs() < 1e-9);
        assert!((curved.time() - 0.16).abs() < 1e-9);
        assert_eq!(curved.config().style, FlowLineStyle::Curved);
        assert_eq!(curved.tick().polylines.len(), 15);
    }
}
