use std::f64::consts::FRAC_PI_2;

use rand::rngs::StdRng;

use crate::core::layout::{linspace, random_y_linspace_x};
use crate::core::{Boundary, Point};
use crate::render::{CirclePrimitive, RenderFrame};

use super::{Scene, SceneKind, SceneSurface, Velocity};

/// Eases a field of points toward random targets, one leg every `frames` ticks.
///
/// Each leg follows a quarter-sine from the previous target toward the next
/// one. The single-point variant pins one large dot at the horizontal center;
/// the multi-point variant spreads `floor(width / 20)` small dots across the
/// inset band.
#[derive(Debug)]
pub struct Oscillator {
    kind: SceneKind,
    surface: SceneSurface,
    rng: StdRng,
    boundary: Boundary,
    count: usize,
    frames: u64,
    dot_size: f64,
    x_span: (f64, f64),
    from: Vec<Point>,
    to: Vec<Point>,
    points: Vec<Point>,
    velocities: Vec<Velocity>,
    counter: u64,
}

impl Oscillator {
    pub const SINGLE_FRAMES: u64 = 30;
    pub const SINGLE_DOT_SIZE: f64 = 20.0;
    pub const MULTI_FRAMES: u64 = 120;
    pub const MULTI_DOT_SIZE: f64 = 4.0;
    pub const MULTI_SPACING: f64 = 20.0;

    #[must_use]
    pub fn single(surface: SceneSurface, rng: StdRng) -> Self {
        let boundary = Boundary::from_viewport(surface.viewport);
        let span = (boundary.x_mid, boundary.x_mid);
        Self::build(
            SceneKind::Introduction,
            surface,
            rng,
            1,
            Self::SINGLE_FRAMES,
            Self::SINGLE_DOT_SIZE,
            span,
        )
    }

    #[must_use]
    pub fn multi(surface: SceneSurface, rng: StdRng) -> Self {
        let boundary = Boundary::from_viewport(surface.viewport);
        let count = (surface.viewport.width_f64() / Self::MULTI_SPACING).floor() as usize;
        Self::build(
            SceneKind::Multiple,
            surface,
            rng,
            count,
            Self::MULTI_FRAMES,
            Self::MULTI_DOT_SIZE,
            (boundary.x_min, boundary.x_max),
        )
    }

    fn build(
        kind: SceneKind,
        surface: SceneSurface,
        rng: StdRng,
        count: usize,
        frames: u64,
        dot_size: f64,
        x_span: (f64, f64),
    ) -> Self {
        let mut oscillator = Self {
            kind,
            boundary: Boundary::from_viewport(surface.viewport),
            surface,
            rng,
            count,
            frames,
            dot_size,
            x_span,
            from: Vec::new(),
            to: Vec::new(),
            points: Vec::new(),
            velocities: Vec::new(),
            counter: 0,
        };
        oscillator.seed_paths();
        oscillator
    }

    fn seed_paths(&mut self) {
        let (x_min, x_max) = self.x_span;
        self.from = linspace(
            self.count,
            x_min,
            x_max,
            self.boundary.y_mid,
            self.boundary.y_mid,
        );
        self.to = self.random_targets();
        self.points = self.from.clone();
        self.velocities = vec![Velocity::default(); self.count];
        self.counter = 0;
    }

    fn random_targets(&mut self) -> Vec<Point> {
        let (x_min, x_max) = self.x_span;
        random_y_linspace_x(
            &mut self.rng,
            self.count,
            x_min,
            x_max,
            self.boundary.y_min,
            self.boundary.y_max,
        )
    }

    /// Current leg targets.
    #[must_use]
    pub fn targets(&self) -> &[Point] {
        &self.to
    }

    #[must_use]
    pub fn frames_per_leg(&self) -> u64 {
        self.frames
    }
}

impl Scene for Oscillator {
    fn kind(&self) -> SceneKind {
        self.kind
    }

    fn step(&mut self) -> RenderFrame {
        self.counter += 1;
        if self.counter % self.frames == 0 {
            let next = self.random_targets();
            self.from = std::mem::replace(&mut self.to, next);
        }

        let phase = (self.counter % self.frames) as f64 / self.frames as f64;
        let ease = (phase * FRAC_PI_2).sin();
        self.points = self
            .from
            .iter()
            .zip(&self.to)
            .map(|(from, to)| Point::new(from.x, from.y + ease * (to.y - from.y)))
            .collect();

        let colors = self.surface.colors;
        let mut frame = RenderFrame::new(self.surface.viewport).with_clear(colors.background);
        if self.surface.show_dots {
            frame.circles.extend(self.points.iter().map(|point| {
                CirclePrimitive::new(point.x, point.y, self.dot_size, true, colors.foreground)
            }));
            frame.circles.extend(self.to.iter().map(|point| {
                CirclePrimitive::new(point.x, point.y, self.dot_size, false, colors.foreground)
            }));
        }
        frame
    }

    fn reset(&mut self) {
        self.seed_paths();
    }

    fn points(&self) -> &[Point] {
        &self.points
    }

    fn velocities(&self) -> &[Velocity] {
        &self.velocities
    }

    fn frame_counter(&self) -> u64 {
        self.counter
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::core::Viewport;

    fn surface() -> SceneSurface {
        SceneSurface::new(Viewport::new(400, 300))
    }

    #[test]
    fn multi_point_count_follows_width() {
        let scene = Oscillator::multi(surface(), StdRng::seed_from_u64(1));
        assert_eq!(scene.points().len(), 20);
        assert_eq!(scene.velocities().len(), 20);
    }

    #[test]
    fn single_point_eases_toward_target() {
        let mut scene = Oscillator::single(surface(), StdRng::seed_from_u64(3));
        let boundary = Boundary::from_size(400.0, 300.0);
        let target = scene.targets()[0];
        let mut previous_gap = (boundary.y_mid - target.y).abs();
        for _ in 1..Oscillator::SINGLE_FRAMES {
            scene.step();
            let point = scene.points()[0];
            assert_eq!(point.x, boundary.x_mid);
            let gap = (point.y - target.y).abs();
            assert!(gap <= previous_gap + 1e-9);
            previous_gap = gap;
        }
    }

    #[test]
    fn leg_rolls_over_after_frames() {
        let mut scene = Oscillator::single(surface(), StdRng::seed_from_u64(9));
        let first_target = scene.targets()[0];
        for _ in 0..Oscillator::SINGLE_FRAMES {
            scene.step();
        }
        // At the rollover tick the dot sits exactly on the old target.
        assert_eq!(scene.points()[0].y, first_target.y);
    }

    #[test]
    fn frames_clear_before_drawing() {
        let mut scene = Oscillator::multi(surface(), StdRng::seed_from_u64(2));
        let frame = scene.step();
        assert!(frame.clear.is_some());
        assert_eq!(frame.circles.len(), 40);
        frame.validate().expect("valid frame");
    }
}
