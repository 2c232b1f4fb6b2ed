use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::error::VizResult;
use crate::host::{FrameHost, FrameRequestId, ListenerId, ListenerKind, SurfaceId, is_surface_visible};

use super::{Scene, SceneEngineConfig, SceneKind, SceneSurface, factory_for};

/// Live state of one mounted scene.
#[derive(Debug)]
pub struct ActiveScene {
    pub scene: Box<dyn Scene>,
    pub surface: SurfaceId,
    /// Pending frame request, `Some` exactly while the loop runs.
    pub frame: Option<FrameRequestId>,
    pub listeners: SmallVec<[ListenerId; 2]>,
}

/// Owns every running scene and the host resources registered for it.
///
/// All work happens on the host's single thread: the host delivers frame,
/// scroll and click callbacks back through `on_frame`, `on_scroll` and
/// `on_click`. Each scene has at most one pending frame request, and the
/// request id is kept so it can be cancelled on pause, reset and teardown.
#[derive(Debug)]
pub struct AnimationManager {
    config: SceneEngineConfig,
    rng: StdRng,
    active: IndexMap<SceneKind, ActiveScene>,
}

impl AnimationManager {
    pub fn new(config: SceneEngineConfig) -> VizResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_entropy(),
            active: IndexMap::new(),
        })
    }

    /// Manager whose scene randomness is reproducible.
    pub fn with_seed(config: SceneEngineConfig, seed: u64) -> VizResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            active: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SceneEngineConfig {
        &self.config
    }

    /// Mounts every configured scene and starts the visible ones.
    ///
    /// A scene whose mount node or drawing context is missing is skipped;
    /// its siblings are unaffected. Returns the number of scenes mounted.
    pub fn start<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let scenes = self.config.scenes.clone();
        let mut mounted = 0;
        for kind in scenes {
            if self.active.contains_key(&kind) {
                continue;
            }
            debug!(scene = %kind, "initializing scene");
            match self.init_scene(host, kind) {
                Ok(()) => mounted += 1,
                Err(err) => warn!(scene = %kind, error = %err, "skipping scene"),
            }
        }
        mounted
    }

    fn init_scene<H: FrameHost + ?Sized>(&mut self, host: &mut H, kind: SceneKind) -> VizResult<()> {
        let viewport = self.config.surface.viewport_for(host.window_size());
        let surface = host.mount_surface(&kind.mount_id(), viewport)?;

        let scene_surface = SceneSurface::new(viewport)
            .with_colors(self.config.colors())
            .with_show_dots(self.config.show_dots);
        let rng = StdRng::seed_from_u64(self.rng.r#gen());
        let scene = factory_for(kind)(scene_surface, rng);

        let mut listeners = SmallVec::new();
        listeners.push(host.add_listener(ListenerKind::Scroll, None));
        listeners.push(host.add_listener(ListenerKind::Click, Some(surface)));

        let mut active = ActiveScene {
            scene,
            surface,
            frame: None,
            listeners,
        };
        if is_surface_visible(&*host, surface) {
            debug!(scene = %kind, "starting visible scene");
            advance(host, kind, &mut active);
        }
        self.active.insert(kind, active);
        Ok(())
    }

    /// Delivers a frame callback. Returns `false` for a request that is no
    /// longer current, which leaves every scene untouched.
    pub fn on_frame<H: FrameHost + ?Sized>(&mut self, host: &mut H, request: FrameRequestId) -> bool {
        let Some((kind, active)) = self
            .active
            .iter_mut()
            .find(|(_, active)| active.frame == Some(request))
        else {
            trace!(request = request.0, "ignoring stale frame request");
            return false;
        };
        advance(host, *kind, active);
        true
    }

    /// Starts scenes that scrolled into view and pauses those that left it.
    pub fn on_scroll<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        for (kind, active) in &mut self.active {
            let visible = is_surface_visible(&*host, active.surface);
            match (visible, active.frame) {
                (true, None) => {
                    debug!(scene = %kind, "starting scene");
                    advance(host, *kind, active);
                }
                (false, Some(request)) => {
                    debug!(scene = %kind, "stopping scene");
                    host.cancel_frame(request);
                    active.frame = None;
                }
                _ => {}
            }
        }
    }

    /// Tears the scene down and reinitializes it with fresh randomness.
    ///
    /// Returns `Ok(false)` when the scene is not mounted.
    pub fn on_click<H: FrameHost + ?Sized>(
        &mut self,
        host: &mut H,
        kind: SceneKind,
    ) -> VizResult<bool> {
        let Some(active) = self.active.shift_remove(&kind) else {
            return Ok(false);
        };
        debug!(scene = %kind, "resetting scene");
        release(host, active);
        self.init_scene(host, kind)?;
        Ok(true)
    }

    /// Cancels every frame, then removes every listener, then unmounts every
    /// surface. Safe to call more than once.
    pub fn stop_all<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if self.active.is_empty() {
            return;
        }
        debug!(scenes = self.active.len(), "cleaning up scenes");
        for (kind, active) in &mut self.active {
            if let Some(request) = active.frame.take() {
                trace!(scene = %kind, "cancelling animation");
                host.cancel_frame(request);
            }
        }
        for active in self.active.values_mut() {
            for listener in active.listeners.drain(..) {
                host.remove_listener(listener);
            }
        }
        for (_, active) in self.active.drain(..) {
            host.unmount_surface(active.surface);
        }
    }

    #[must_use]
    pub fn is_running(&self, kind: SceneKind) -> bool {
        self.active
            .get(&kind)
            .is_some_and(|active| active.frame.is_some())
    }

    #[must_use]
    pub fn running_count(&self) -> usize {
        self.active
            .values()
            .filter(|active| active.frame.is_some())
            .count()
    }

    #[must_use]
    pub fn mounted_count(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn scene(&self, kind: SceneKind) -> Option<&dyn Scene> {
        self.active.get(&kind).map(|active| active.scene.as_ref())
    }

    #[must_use]
    pub fn active(&self, kind: SceneKind) -> Option<&ActiveScene> {
        self.active.get(&kind)
    }

    #[must_use]
    pub fn pending_frame(&self, kind: SceneKind) -> Option<FrameRequestId> {
        self.active.get(&kind).and_then(|active| active.frame)
    }
}

/// Schedules the next frame, then steps and presents the current one.
fn advance<H: FrameHost + ?Sized>(host: &mut H, kind: SceneKind, active: &mut ActiveScene) {
    active.frame = Some(host.request_frame());
    let frame = active.scene.step();
    trace!(
        scene = %kind,
        counter = active.scene.frame_counter(),
        circles = frame.circles.len(),
        "scene step"
    );
    if let Err(err) = host.present(active.surface, &frame) {
        warn!(scene = %kind, error = %err, "failed to present scene frame");
    }
}

/// Releases one scene's host resources: frame first, then listeners, then
/// the surface.
fn release<H: FrameHost + ?Sized>(host: &mut H, mut active: ActiveScene) {
    if let Some(request) = active.frame.take() {
        host.cancel_frame(request);
    }
    for listener in active.listeners.drain(..) {
        host.remove_listener(listener);
    }
    host.unmount_surface(active.surface);
}
