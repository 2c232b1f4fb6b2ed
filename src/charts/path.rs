use std::fmt::Write as _;

use crate::core::Point;

/// Incremental builder for SVG path `d` attributes.
///
/// Coordinates are written with at most four decimals and no trailing zeros.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathBuilder {
    data: String,
}

impl PathBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_path(path: &str) -> Self {
        Self {
            data: path.to_owned(),
        }
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.command('M');
        self.push_point(point);
        self
    }

    pub fn line_to(&mut self, point: Point) -> &mut Self {
        self.command('L');
        self.push_point(point);
        self
    }

    pub fn cubic_to(&mut self, control1: Point, control2: Point, end: Point) -> &mut Self {
        self.command('C');
        self.push_point(control1);
        self.data.push(',');
        self.data.push(' ');
        self.push_point(control2);
        self.data.push(',');
        self.data.push(' ');
        self.push_point(end);
        self
    }

    /// Elliptical arc with circular radius, no rotation and the small-arc flag.
    pub fn arc_to(&mut self, radius: f64, sweep: bool, end: Point) -> &mut Self {
        self.command('A');
        let _ = write!(
            self.data,
            "{r} {r} 0 0 {s} ",
            r = format_number(radius),
            s = u8::from(sweep)
        );
        self.push_point(end);
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.command('Z');
        self.data.pop();
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.data
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.data
    }

    fn command(&mut self, letter: char) {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        self.data.push(letter);
        self.data.push(' ');
    }

    fn push_point(&mut self, point: Point) {
        let _ = write!(
            self.data,
            "{} {}",
            format_number(point.x),
            format_number(point.y)
        );
    }
}

/// Formats a coordinate for path output.
///
/// Non-finite input is written as `0` so a path string can never carry `NaN`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_owned();
    }
    let rounded = (value * 10_000.0).round() / 10_000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let mut text = format!("{rounded:.4}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

/// Pulls every numeric token out of a path string.
///
/// Useful for checking that generated paths stay inside their view box.
#[must_use]
pub fn path_numbers(path: &str) -> Vec<f64> {
    path.split(|c: char| c.is_whitespace() || c == ',')
        .filter_map(|token| token.parse::<f64>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.0 / 3.0), "0.3333");
        assert_eq!(format_number(-0.00001), "0");
        assert_eq!(format_number(f64::NAN), "0");
    }

    #[test]
    fn builder_emits_commands_in_order() {
        let mut path = PathBuilder::new();
        path.move_to(Point::new(0.0, 1.0))
            .line_to(Point::new(2.0, 3.0))
            .close();
        assert_eq!(path.as_str(), "M 0 1 L 2 3 Z");
    }

    #[test]
    fn arc_command_matches_svg_grammar() {
        let mut path = PathBuilder::new();
        path.move_to(Point::new(4.0, 40.0))
            .arc_to(36.0, true, Point::new(76.0, 40.0));
        assert_eq!(path.as_str(), "M 4 40 A 36 36 0 0 1 76 40");
        assert_eq!(path_numbers(path.as_str()).len(), 9);
    }
}
