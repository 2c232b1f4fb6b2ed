use rand::rngs::StdRng;

use crate::core::layout::{linspace, permute_y};
use crate::core::{Boundary, Point};
use crate::render::{CirclePrimitive, RenderFrame};

use super::{Scene, SceneKind, SceneSurface, Velocity};

/// Row of dots on the vertical midline, each nudged by uniform noise per frame.
#[derive(Debug)]
pub struct LocalJitterField {
    surface: SceneSurface,
    rng: StdRng,
    boundary: Boundary,
    count: usize,
    points: Vec<Point>,
    velocities: Vec<Velocity>,
    counter: u64,
}

impl LocalJitterField {
    pub const NOISE: f64 = 2.0;
    pub const DOT_SIZE: f64 = 4.0;
    pub const SPACING: f64 = 20.0;

    #[must_use]
    pub fn new(surface: SceneSurface, rng: StdRng) -> Self {
        let count = (surface.viewport.width_f64() / Self::SPACING).floor() as usize;
        let mut field = Self {
            boundary: Boundary::from_viewport(surface.viewport),
            surface,
            rng,
            count,
            points: Vec::new(),
            velocities: Vec::new(),
            counter: 0,
        };
        field.reset();
        field
    }
}

impl Scene for LocalJitterField {
    fn kind(&self) -> SceneKind {
        SceneKind::Memory
    }

    fn step(&mut self) -> RenderFrame {
        self.counter += 1;
        permute_y(&mut self.rng, &mut self.points, Self::NOISE);

        let colors = self.surface.colors;
        let mut frame = RenderFrame::new(self.surface.viewport).with_clear(colors.background);
        if self.surface.show_dots {
            frame.circles.extend(self.points.iter().map(|point| {
                CirclePrimitive::new(point.x, point.y, Self::DOT_SIZE, true, colors.foreground)
            }));
        }
        frame
    }

    fn reset(&mut self) {
        self.points = linspace(
            self.count,
            self.boundary.x_min,
            self.boundary.x_max,
            self.boundary.y_mid,
            self.boundary.y_mid,
        );
        self.velocities = vec![Velocity::default(); self.count];
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
