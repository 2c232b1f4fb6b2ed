use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::core::layout::{circle, jitter, limit, linspace, random_circle};
use crate::core::{Boundary, Point};
use crate::render::{CirclePrimitive, Color, RenderFrame};

use super::{Scene, SceneKind, SceneSurface, Velocity};

/// Initial point layout of a velocity exposure walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExposureLayout {
    /// Horizontal line, only y moves.
    Line1d,
    /// Horizontal line, both axes move.
    Line2d,
    /// Evenly spaced around a circle.
    Circle,
    /// Random angles on a circle.
    RandomCircle,
}

impl ExposureLayout {
    #[must_use]
    pub const fn kind(self) -> SceneKind {
        match self {
            ExposureLayout::Line1d => SceneKind::History,
            ExposureLayout::Line2d => SceneKind::DifferentDimensions,
            ExposureLayout::Circle => SceneKind::NewBeginnings,
            ExposureLayout::RandomCircle => SceneKind::MoreRandom,
        }
    }

    #[must_use]
    pub const fn moves_x(self) -> bool {
        !matches!(self, ExposureLayout::Line1d)
    }
}

/// Long-exposure random walk.
///
/// Velocities receive uniform noise every frame and each point moves by the
/// running prefix sum of the velocities up to its index, so neighbours drift
/// together. Positions are clamped to the surface edges. The surface is only
/// wiped on the first frame after (re)initialization; later frames stack
/// translucent dots on top of each other.
#[derive(Debug)]
pub struct VelocityExposureWalk {
    layout: ExposureLayout,
    surface: SceneSurface,
    rng: StdRng,
    boundary: Boundary,
    count: usize,
    points: Vec<Point>,
    velocities: Vec<Velocity>,
    counter: u64,
}

impl VelocityExposureWalk {
    pub const NOISE: f64 = 0.01;
    pub const DOT_SIZE: f64 = 1.0;
    pub const RADIUS_FRACTION: f64 = 0.2;

    /// Fill of accumulated dots.
    #[must_use]
    pub fn exposure_color() -> Color {
        Color::rgba8(43, 95, 111, 0.05)
    }

    #[must_use]
    pub fn new(layout: ExposureLayout, surface: SceneSurface, rng: StdRng) -> Self {
        let count = surface.viewport.width_f64().floor() as usize;
        let mut walk = Self {
            layout,
            boundary: Boundary::from_viewport(surface.viewport),
            surface,
            rng,
            count,
            points: Vec::new(),
            velocities: Vec::new(),
            counter: 0,
        };
        walk.reset();
        walk
    }

    #[must_use]
    pub fn layout(&self) -> ExposureLayout {
        self.layout
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        let viewport = self.surface.viewport;
        (Self::RADIUS_FRACTION * viewport.width_f64())
            .min(Self::RADIUS_FRACTION * viewport.height_f64())
    }

    fn initial_points(&mut self) -> Vec<Point> {
        let b = self.boundary;
        match self.layout {
            ExposureLayout::Line1d | ExposureLayout::Line2d => {
                linspace(self.count, b.x_min, b.x_max, b.y_mid, b.y_mid)
            }
            ExposureLayout::Circle => circle(self.count, b.x_mid, b.y_mid, self.radius()),
            ExposureLayout::RandomCircle => {
                let radius = self.radius();
                random_circle(&mut self.rng, self.count, b.x_mid, b.y_mid, radius)
            }
        }
    }
}

impl Scene for VelocityExposureWalk {
    fn kind(&self) -> SceneKind {
        self.layout.kind()
    }

    fn step(&mut self) -> RenderFrame {
        self.counter += 1;
        let moves_x = self.layout.moves_x();
        for velocity in &mut self.velocities {
            if moves_x {
                velocity.x += jitter(&mut self.rng, Self::NOISE);
            }
            velocity.y += jitter(&mut self.rng, Self::NOISE);
        }

        let b = self.boundary;
        let (mut sum_x, mut sum_y) = (0.0, 0.0);
        for (point, velocity) in self.points.iter_mut().zip(&self.velocities) {
            sum_x += velocity.x;
            sum_y += velocity.y;
            if moves_x {
                point.x = limit(point.x + sum_x, b.xr, b.xl);
            }
            point.y = limit(point.y + sum_y, b.yb, b.yt);
        }

        let mut frame = RenderFrame::new(self.surface.viewport);
        if self.counter == 1 {
            frame = frame.with_clear(self.surface.colors.background);
        }
        if self.surface.show_dots {
            let fill = Self::exposure_color();
            frame.circles.extend(
                self.points
                    .iter()
                    .map(|point| CirclePrimitive::new(point.x, point.y, Self::DOT_SIZE, true, fill)),
            );
        }
        frame
    }

    fn reset(&mut self) {
        self.points = self.initial_points();
        self.velocities = vec![Velocity::default(); self.points.len()];
        self.counter = 0;
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

    fn walk(layout: ExposureLayout) -> VelocityExposureWalk {
        let surface = SceneSurface::new(Viewport::new(360, 400));
        VelocityExposureWalk::new(layout, surface, StdRng::seed_from_u64(11))
    }

    #[test]
    fn line_walk_keeps_x_fixed() {
        let mut scene = walk(ExposureLayout::Line1d);
        let xs: Vec<f64> = scene.points().iter().map(|p| p.x).collect();
        for _ in 0..50 {
            scene.step();
        }
        let after: Vec<f64> = scene.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, after);
        assert!(scene.velocities().iter().all(|v| v.x == 0.0));
    }

    #[test]
    fn circle_layout_uses_fifth_of_smaller_side() {
        let scene = walk(ExposureLayout::Circle);
        assert_eq!(scene.points().len(), 360);
        assert!((scene.radius() - 72.0).abs() < 1e-12);
    }

    #[test]
    fn only_first_frame_clears() {
        let mut scene = walk(ExposureLayout::RandomCircle);
        assert!(scene.step().clear.is_some());
        assert!(scene.step().clear.is_none());
        scene.reset();
        assert!(scene.step().clear.is_some());
    }

    #[test]
    fn points_stay_clamped_to_surface() {
        let mut scene = walk(ExposureLayout::Line2d);
        let bounds = Boundary::from_size(360.0, 400.0);
        for _ in 0..400 {
            scene.step();
        }
        assert!(scene.points().iter().all(|p| bounds.contains(*p)));
    }
}
