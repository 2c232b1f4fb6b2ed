//! Point-field generators shared by the scene strategies.
//!
//! Spacing follows a half-open convention: `n` points start at the lower bound
//! and advance by `(max - min) / n`, so the upper bound itself is never emitted.

use std::f64::consts::TAU;

use rand::Rng;

use crate::core::Point;

/// Evenly spaced points along both axes.
#[must_use]
pub fn linspace(n: usize, x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Vec<Point> {
    if n == 0 {
        return Vec::new();
    }
    let step_x = (x_max - x_min) / n as f64;
    let step_y = (y_max - y_min) / n as f64;
    (0..n)
        .map(|i| Point::new(x_min + step_x * i as f64, y_min + step_y * i as f64))
        .collect()
}

/// Evenly spaced x with y drawn uniformly from `[y_min, y_max)`.
#[must_use]
pub fn random_y_linspace_x<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) -> Vec<Point> {
    if n == 0 {
        return Vec::new();
    }
    let step = (x_max - x_min) / n as f64;
    (0..n)
        .map(|i| {
            let y = y_min + rng.r#gen::<f64>() * (y_max - y_min);
            Point::new(x_min + step * i as f64, y)
        })
        .collect()
}

/// Points at evenly spaced angles around a circle, starting at angle zero.
#[must_use]
pub fn circle(n: usize, cx: f64, cy: f64, radius: f64) -> Vec<Point> {
    if n == 0 {
        return Vec::new();
    }
    let step = TAU / n as f64;
    (0..n)
        .map(|i| {
            let angle = step * i as f64;
            Point::new(cx + angle.cos() * radius, cy + angle.sin() * radius)
        })
        .collect()
}

/// Points at uniformly random angles on a circle.
#[must_use]
pub fn random_circle<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    cx: f64,
    cy: f64,
    radius: f64,
) -> Vec<Point> {
    (0..n)
        .map(|_| {
            let angle = rng.r#gen::<f64>() * TAU;
            Point::new(cx + angle.cos() * radius, cy + angle.sin() * radius)
        })
        .collect()
}

/// Uniform sample in `[-noise, noise]`.
#[must_use]
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, noise: f64) -> f64 {
    (1.0 - 2.0 * rng.r#gen::<f64>()) * noise
}

/// Perturbs the y coordinate of every point in place.
pub fn permute_y<R: Rng + ?Sized>(rng: &mut R, points: &mut [Point], noise: f64) {
    for point in points {
        point.y += jitter(rng, noise);
    }
}

/// Perturbs every value in place.
pub fn permute<R: Rng + ?Sized>(rng: &mut R, values: &mut [f64], noise: f64) {
    for value in values {
        *value += jitter(rng, noise);
    }
}

/// Clamps `value` into `[min, max]`.
#[must_use]
pub fn limit(value: f64, max: f64, min: f64) -> f64 {
    value.min(max).max(min)
}
