//! Host environment seam for frame-driven animations.
//!
//! Animations never talk to a windowing system directly. A `FrameHost` owns
//! the drawing surfaces, the per-frame callback scheduler (the
//! `requestAnimationFrame` analogue) and the event listener registry; the
//! animation drivers only hold the opaque ids it hands out and release every
//! one of them on teardown.

mod headless;

pub use headless::{HeadlessFrameHost, MountedSurface};

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::VizResult;
use crate::render::RenderFrame;

/// Drawing surface created inside a mount node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(pub u64);

/// Pending per-frame callback request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameRequestId(pub u64);

/// Registered event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenerKind {
    /// Window scroll, drives visibility gating.
    Scroll,
    /// Click on one surface, drives scene reset.
    Click,
    /// Window resize, drives surface re-sizing.
    Resize,
}

/// Single-threaded host the animation drivers schedule work on.
///
/// Frame callbacks are delivered back to the driver by the host event loop;
/// a cancelled request must never be delivered.
pub trait FrameHost {
    /// Current window size in CSS pixels, `None` when there is no window.
    fn window_size(&self) -> Option<(f64, f64)>;

    /// Height of the visible viewport band used for visibility tests.
    fn viewport_height(&self) -> f64;

    /// Creates a drawing surface inside the named mount node.
    ///
    /// Fails with `MissingSurface` when the mount node does not exist and with
    /// `MissingContext` when no 2D context can be acquired for it.
    fn mount_surface(&mut self, mount: &str, viewport: Viewport) -> VizResult<SurfaceId>;

    fn resize_surface(&mut self, surface: SurfaceId, viewport: Viewport);

    fn unmount_surface(&mut self, surface: SurfaceId);

    /// Vertical midpoint of the surface relative to the top of the viewport.
    fn surface_midpoint_y(&self, surface: SurfaceId) -> Option<f64>;

    fn request_frame(&mut self) -> FrameRequestId;

    fn cancel_frame(&mut self, request: FrameRequestId);

    fn add_listener(&mut self, kind: ListenerKind, surface: Option<SurfaceId>) -> ListenerId;

    fn remove_listener(&mut self, listener: ListenerId);

    /// Draws a frame onto the surface.
    fn present(&mut self, surface: SurfaceId, frame: &RenderFrame) -> VizResult<()>;
}

/// True when the surface midpoint lies strictly inside the viewport band.
#[must_use]
pub fn is_surface_visible<H: FrameHost + ?Sized>(host: &H, surface: SurfaceId) -> bool {
    host.surface_midpoint_y(surface)
        .is_some_and(|mid| mid > 0.0 && mid < host.viewport_height())
}
