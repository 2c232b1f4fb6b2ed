use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::trace;

use crate::core::Viewport;
use crate::error::{VizError, VizResult};
use crate::render::{NullRenderer, RenderFrame, Renderer};

use super::{FrameHost, FrameRequestId, ListenerId, ListenerKind, SurfaceId};

/// Surface bookkeeping kept by the headless host.
#[derive(Debug)]
pub struct MountedSurface {
    pub mount: String,
    pub viewport: Viewport,
    pub renderer: NullRenderer,
    pub last_frame: Option<RenderFrame>,
}

/// In-memory `FrameHost` used by tests, benches and offline tooling.
///
/// Mount nodes are registered with a document-space top offset; the viewport
/// band starts at `scroll_offset` and is `window height` tall. Frame requests
/// queue up until the caller drains them, which stands in for one browser
/// animation tick.
#[derive(Debug)]
pub struct HeadlessFrameHost {
    window: Option<(f64, f64)>,
    scroll_offset: f64,
    mounts: IndexMap<String, f64>,
    broken_contexts: HashSet<String>,
    surfaces: IndexMap<SurfaceId, MountedSurface>,
    pending_frames: Vec<FrameRequestId>,
    listeners: IndexMap<ListenerId, (ListenerKind, Option<SurfaceId>)>,
    next_id: u64,
    frames_requested: usize,
    frames_cancelled: usize,
}

impl HeadlessFrameHost {
    #[must_use]
    pub fn new(window_width: f64, window_height: f64) -> Self {
        Self {
            window: Some((window_width, window_height)),
            scroll_offset: 0.0,
            mounts: IndexMap::new(),
            broken_contexts: HashSet::new(),
            surfaces: IndexMap::new(),
            pending_frames: Vec::new(),
            listeners: IndexMap::new(),
            next_id: 1,
            frames_requested: 0,
            frames_cancelled: 0,
        }
    }

    /// Host without a window, as during server-side prerendering.
    #[must_use]
    pub fn windowless() -> Self {
        let mut host = Self::new(0.0, 0.0);
        host.window = None;
        host
    }

    /// Registers a mount node whose top edge sits at `top` in document space.
    #[must_use]
    pub fn with_mount(mut self, mount: impl Into<String>, top: f64) -> Self {
        self.add_mount(mount, top);
        self
    }

    pub fn add_mount(&mut self, mount: impl Into<String>, top: f64) {
        self.mounts.insert(mount.into(), top);
    }

    pub fn remove_mount(&mut self, mount: &str) {
        self.mounts.shift_remove(mount);
    }

    /// Makes 2D context acquisition fail for surfaces created in `mount`.
    pub fn break_context(&mut self, mount: impl Into<String>) {
        self.broken_contexts.insert(mount.into());
    }

    pub fn set_window_size(&mut self, width: f64, height: f64) {
        self.window = Some((width, height));
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    #[must_use]
    pub fn pending_frames(&self) -> &[FrameRequestId] {
        &self.pending_frames
    }

    /// Takes every queued frame request, in request order.
    pub fn drain_frames(&mut self) -> Vec<FrameRequestId> {
        std::mem::take(&mut self.pending_frames)
    }

    #[must_use]
    pub fn frames_requested(&self) -> usize {
        self.frames_requested
    }

    #[must_use]
    pub fn frames_cancelled(&self) -> usize {
        self.frames_cancelled
    }

    #[must_use]
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        self.listeners
            .values()
            .filter(|(listener_kind, _)| *listener_kind == kind)
            .count()
    }

    #[must_use]
    pub fn total_listeners(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    #[must_use]
    pub fn surface(&self, surface: SurfaceId) -> Option<&MountedSurface> {
        self.surfaces.get(&surface)
    }

    /// Live surface mounted in `mount`, if any.
    #[must_use]
    pub fn surface_in(&self, mount: &str) -> Option<SurfaceId> {
        self.surfaces
            .iter()
            .find(|(_, surface)| surface.mount == mount)
            .map(|(id, _)| *id)
    }

    fn next(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl FrameHost for HeadlessFrameHost {
    fn window_size(&self) -> Option<(f64, f64)> {
        self.window
    }

    fn viewport_height(&self) -> f64 {
        self.window.map_or(0.0, |(_, height)| height)
    }

    fn mount_surface(&mut self, mount: &str, viewport: Viewport) -> VizResult<SurfaceId> {
        if !self.mounts.contains_key(mount) {
            return Err(VizError::MissingSurface {
                mount: mount.to_owned(),
            });
        }
        if !viewport.is_valid() {
            return Err(VizError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if self.broken_contexts.contains(mount) {
            return Err(VizError::MissingContext {
                mount: mount.to_owned(),
            });
        }

        // A mount node holds one surface; remounting replaces the old one.
        if let Some(previous) = self.surface_in(mount) {
            self.surfaces.shift_remove(&previous);
        }

        let id = SurfaceId(self.next());
        self.surfaces.insert(
            id,
            MountedSurface {
                mount: mount.to_owned(),
                viewport,
                renderer: NullRenderer::default(),
                last_frame: None,
            },
        );
        Ok(id)
    }

    fn resize_surface(&mut self, surface: SurfaceId, viewport: Viewport) {
        if let Some(mounted) = self.surfaces.get_mut(&surface) {
            mounted.viewport = viewport;
        }
    }

    fn unmount_surface(&mut self, surface: SurfaceId) {
        self.surfaces.shift_remove(&surface);
    }

    fn surface_midpoint_y(&self, surface: SurfaceId) -> Option<f64> {
        let mounted = self.surfaces.get(&surface)?;
        let top = self.mounts.get(&mounted.mount)?;
        Some(top + mounted.viewport.height_f64() / 2.0 - self.scroll_offset)
    }

    fn request_frame(&mut self) -> FrameRequestId {
        let id = FrameRequestId(self.next());
        self.pending_frames.push(id);
        self.frames_requested += 1;
        id
    }

    fn cancel_frame(&mut self, request: FrameRequestId) {
        let before = self.pending_frames.len();
        self.pending_frames.retain(|pending| *pending != request);
        if self.pending_frames.len() != before {
            self.frames_cancelled += 1;
        }
    }

    fn add_listener(&mut self, kind: ListenerKind, surface: Option<SurfaceId>) -> ListenerId {
        let id = ListenerId(self.next());
        self.listeners.insert(id, (kind, surface));
        id
    }

    fn remove_listener(&mut self, listener: ListenerId) {
        self.listeners.shift_remove(&listener);
    }

    fn present(&mut self, surface: SurfaceId, frame: &RenderFrame) -> VizResult<()> {
        let mounted = self.surfaces.get_mut(&surface).ok_or_else(|| {
            VizError::InvalidData(format!("surface {} is not mounted", surface.0))
        })?;
        mounted.renderer.render(frame)?;
        mounted.last_frame = Some(frame.clone());
        trace!(surface = surface.0, primitives = frame.primitive_count(), "presented frame");
        Ok(())
    }
}
