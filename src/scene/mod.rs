//! Generative dot-field scenes and the manager that drives them.
//!
//! A scene is a small state machine: `step` advances it by one animation tick
//! and returns the draw commands for that tick. Scenes never schedule work
//! themselves; `AnimationManager` owns frame requests, listeners and surfaces
//! through a `FrameHost`.

mod config;
mod exposure;
mod jitter;
mod kind;
mod manager;
mod oscillator;

pub use config::{SceneEngineConfig, SurfaceSizing};
pub use exposure::{ExposureLayout, VelocityExposureWalk};
pub use jitter::LocalJitterField;
pub use kind::SceneKind;
pub use manager::{ActiveScene, AnimationManager};
pub use oscillator::Oscillator;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::core::{Point, Viewport};
use crate::render::{Color, RenderFrame};

/// Per-point drift applied by the exposure walks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneColors {
    pub background: Color,
    pub foreground: Color,
}

impl Default for SceneColors {
    fn default() -> Self {
        let config = SceneEngineConfig::default();
        config.colors()
    }
}

/// Everything a scene needs to know about the surface it draws on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneSurface {
    pub viewport: Viewport,
    pub colors: SceneColors,
    pub show_dots: bool,
}

impl SceneSurface {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            colors: SceneColors::default(),
            show_dots: true,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, colors: SceneColors) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_show_dots(mut self, show_dots: bool) -> Self {
        self.show_dots = show_dots;
        self
    }
}

/// One generative scene strategy.
///
/// `points().len() == velocities().len()` holds after construction, every
/// `step` and every `reset`.
pub trait Scene: std::fmt::Debug {
    fn kind(&self) -> SceneKind;

    /// Advances one tick and returns what to draw for it.
    fn step(&mut self) -> RenderFrame;

    /// Restores the initial layout with fresh randomness.
    fn reset(&mut self);

    fn points(&self) -> &[Point];

    fn velocities(&self) -> &[Velocity];

    fn frame_counter(&self) -> u64;
}

pub type SceneFactory = fn(SceneSurface, StdRng) -> Box<dyn Scene>;

fn introduction(surface: SceneSurface, rng: StdRng) -> Box<dyn Scene> {
    Box::new(Oscillator::single(surface, rng))
}

fn multiple(surface: SceneSurface, rng: StdRng) -> Box<dyn Scene> {
    Box::new(Oscillator::multi(surface, rng))
}

fn memory(surface: SceneSurface, rng: StdRng) -> Box<dyn Scene> {
    Box::new(LocalJitterField::new(surface, rng))
}

fn history(surface: SceneSurface, rng: StdRng) -> Box<dyn Scene> {
    Box::new(VelocityExposureWalk::new(ExposureLayout::Line1d, surface, rng))
}

fn different_dimensions(surface: SceneSurface, rng: StdRng) -> Box<dyn Scene> {
    Box::new(VelocityExposureWalk::new(ExposureLayout::Line2d, surface, rng))
}

fn new_beginnings(surface: SceneSurface, rng: StdRng) -> Box<dyn Scene> {
    Box::new(VelocityExposureWalk::new(ExposureLayout::Circle, surface, rng))
}

fn more_random(surface: SceneSurface, rng: StdRng) -> Box<dyn Scene> {
    Box::new(VelocityExposureWalk::new(
        ExposureLayout::RandomCircle,
        surface,
        rng,
    ))
}

/// Scene id to constructor table.
pub const SCENE_FACTORIES: [(SceneKind, SceneFactory); 7] = [
    (SceneKind::Introduction, introduction),
    (SceneKind::Multiple, multiple),
    (SceneKind::Memory, memory),
    (SceneKind::History, history),
    (SceneKind::DifferentDimensions, different_dimensions),
    (SceneKind::NewBeginnings, new_beginnings),
    (SceneKind::MoreRandom, more_random),
];

#[must_use]
pub fn factory_for(kind: SceneKind) -> SceneFactory {
    SCENE_FACTORIES
        .iter()
        .find(|(candidate, _)| *candidate == kind)
        .map_or(introduction as SceneFactory, |(_, factory)| *factory)
}
