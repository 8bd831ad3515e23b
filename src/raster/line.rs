// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{Canvas, Pixel};

/// A line in (major, minor) axis coordinates, with the major axis ascending
/// from `x1` to `x2`.
///
/// Differences are kept in 128 bits, so that lines between any two
/// [Pixels](Pixel) can be described without overflow.
struct Line {
    steep: bool,
    x1: i64,
    x2: i64,
    y1: i64,
    y_step: i128,
    dx: u128,
    dy: u128,
}

impl Line {
    fn new(a: Pixel, b: Pixel) -> Self {
        let d_row = b.row as i128 - a.row as i128;
        let d_col = b.col as i128 - a.col as i128;
        let steep = d_row.abs() > d_col.abs();

        let (mut x1, mut y1, mut x2, mut y2) = if steep {
            (a.row, a.col, b.row, b.col)
        } else {
            (a.col, a.row, b.col, b.row)
        };

        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
            std::mem::swap(&mut y1, &mut y2);
        }

        Self {
            steep,
            x1,
            x2,
            y1,
            y_step: if y1 < y2 { 1 } else { -1 },
            dx: (x2 as i128 - x1 as i128) as u128,
            dy: (y2 as i128 - y1 as i128).unsigned_abs(),
        }
    }

    /// Number of minor axis steps taken before reaching major coordinate `x`.
    ///
    /// The iterative form starts the error term at `dx/2`, subtracts `dy` on every
    /// major step and steps the minor axis (adding `dx`) whenever it drops below zero.
    /// After `k` major steps that amounts to `ceil((2*dy*k - dx) / (2*dx))` minor steps,
    /// computed here as `q + (2*r > dx)` for `dy*k = q*dx + r`.
    fn minor_steps(&self, x: i64) -> u128 {
        if self.dx == 0 {
            return 0;
        }

        let k = (x as i128 - self.x1 as i128) as u128;
        let p = self.dy * k;
        let (q, r) = (p / self.dx, p % self.dx);
        if 2 * r > self.dx {
            q + 1
        } else {
            q
        }
    }

    fn pixel_at(&self, x: i64) -> Pixel {
        // The result lies between y1 and y2, so it always fits in an i64.
        let y = (self.y1 as i128 + self.y_step * self.minor_steps(x) as i128) as i64;
        if self.steep {
            Pixel { row: x, col: y }
        } else {
            Pixel { row: y, col: x }
        }
    }

    /// Pixels of the line with the major coordinate in `from..=to`.
    fn pixels(&self, from: i64, to: i64) -> impl Iterator<Item = Pixel> + '_ {
        (from.max(self.x1)..=to.min(self.x2)).map(move |x| self.pixel_at(x))
    }
}

/// Computes the pixels of a line between two points using
/// [Bresenham's algorithm](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm).
///
/// Both endpoints are always included. Pixels are returned in ascending order
/// along the major axis of the line (rows for steep lines, columns otherwise),
/// so swapping `a` and `b` yields the same pixels.
///
/// The whole line is materialized - use [draw_line] for lines which may
/// extend far outside of a canvas.
pub fn line_points(a: Pixel, b: Pixel) -> Vec<Pixel> {
    let line = Line::new(a, b);
    line.pixels(line.x1, line.x2).collect()
}

fn dimension(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Shades a square "blot" with the side of `size` pixels around `at`.
///
/// The square spans from `at - size / 2` (inclusive) on both axes.
/// Parts of the square outside of the canvas are skipped.
pub fn draw_point(canvas: &mut Canvas, at: Pixel, size: u32, intensity: u8) {
    let size = size as i64;
    let start_row = at.row.saturating_sub(size / 2);
    let start_col = at.col.saturating_sub(size / 2);

    let rows = start_row.max(0)..start_row.saturating_add(size).min(dimension(canvas.rows()));
    let cols = start_col.max(0)..start_col.saturating_add(size).min(dimension(canvas.cols()));

    for row in rows {
        for col in cols.clone() {
            canvas.set(row, col, intensity);
        }
    }
}

/// Draws a line between two points by shading a blot of `thickness` pixels
/// at every point of the [line](line_points).
///
/// Only the part of the line whose blots can reach the canvas is walked,
/// so endpoints arbitrarily far outside of the canvas are fine.
pub fn draw_line(canvas: &mut Canvas, a: Pixel, b: Pixel, thickness: u32, intensity: u8) {
    let line = Line::new(a, b);
    let margin = thickness as i64;

    let (major_len, minor_len) = if line.steep {
        (dimension(canvas.rows()), dimension(canvas.cols()))
    } else {
        (dimension(canvas.cols()), dimension(canvas.rows()))
    };
    let minor_range = -margin..=minor_len.saturating_add(margin);

    for p in line.pixels(-margin, major_len.saturating_add(margin)) {
        let minor = if line.steep { p.col } else { p.row };
        if minor_range.contains(&minor) {
            draw_point(canvas, p, thickness, intensity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(row: i64, col: i64) -> Pixel {
        Pixel { row, col }
    }

    fn pixels(points: &[(i64, i64)]) -> Vec<Pixel> {
        points.iter().map(|&(row, col)| px(row, col)).collect()
    }

    #[test]
    fn diagonal() {
        assert_eq!(
            line_points(px(0, 0), px(5, 5)),
            pixels(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4), (5, 5)]),
        );
    }

    #[test]
    fn adjacent_pixels() {
        for (dr, dc) in [(0, 1), (1, 0), (1, 1), (1, -1), (-1, 1), (-1, -1), (0, -1), (-1, 0)] {
            let a = px(3, 3);
            let b = px(3 + dr, 3 + dc);
            let points = line_points(a, b);
            assert_eq!(points.len(), 2, "({}, {})", dr, dc);
            assert!(points.contains(&a));
            assert!(points.contains(&b));
        }
    }

    #[test]
    fn single_pixel() {
        assert_eq!(line_points(px(4, 2), px(4, 2)), pixels(&[(4, 2)]));
    }

    #[test]
    fn horizontal_and_vertical() {
        assert_eq!(
            line_points(px(2, 0), px(2, 3)),
            pixels(&[(2, 0), (2, 1), (2, 2), (2, 3)]),
        );
        assert_eq!(
            line_points(px(3, 1), px(0, 1)),
            pixels(&[(0, 1), (1, 1), (2, 1), (3, 1)]),
        );
    }

    #[test]
    fn shallow_line() {
        assert_eq!(
            line_points(px(0, 0), px(2, 5)),
            pixels(&[(0, 0), (0, 1), (1, 2), (1, 3), (2, 4), (2, 5)]),
        );
    }

    #[test]
    fn steep_line() {
        assert_eq!(
            line_points(px(0, 0), px(5, 2)),
            pixels(&[(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)]),
        );
    }

    #[test]
    fn descending_minor_axis() {
        assert_eq!(
            line_points(px(0, 3), px(3, 0)),
            pixels(&[(3, 0), (2, 1), (1, 2), (0, 3)]),
        );
    }

    #[test]
    fn endpoint_order_does_not_matter() {
        let pairs = [
            (px(0, 0), px(7, 3)),
            (px(-4, 9), px(6, -2)),
            (px(10, 1), px(2, 15)),
        ];
        for (a, b) in pairs {
            assert_eq!(line_points(a, b), line_points(b, a));
        }
    }

    #[test]
    fn line_is_connected() {
        let points = line_points(px(-3, 8), px(20, -5));
        assert!(points.contains(&px(-3, 8)));
        assert!(points.contains(&px(20, -5)));
        for pair in points.windows(2) {
            assert!((pair[0].row - pair[1].row).abs() <= 1);
            assert!((pair[0].col - pair[1].col).abs() <= 1);
        }
    }

    #[test]
    fn point_is_clipped_at_origin() {
        let mut c = Canvas::new(6, 6);
        draw_point(&mut c, px(0, 0), 4, 50);

        // The blot spans -2..2 on both axes, only the [0, 2) part is visible.
        for row in 0..6 {
            for col in 0..6 {
                let expected = if row < 2 && col < 2 { 50 } else { 255 };
                assert_eq!(c.get(row, col), Some(expected), "({}, {})", row, col);
            }
        }
    }

    #[test]
    fn point_is_clipped_at_far_corner() {
        let mut c = Canvas::new(4, 4);
        draw_point(&mut c, px(3, 3), 4, 10);
        assert_eq!(c.get(1, 1), Some(10));
        assert_eq!(c.get(3, 3), Some(10));
        assert_eq!(c.get(0, 3), Some(255));
        assert_eq!(c.get(3, 0), Some(255));
    }

    #[test]
    fn point_outside_of_canvas() {
        let mut c = Canvas::new(4, 4);
        draw_point(&mut c, px(-100, 50), 8, 0);
        assert_eq!(c, Canvas::new(4, 4));
    }

    #[test]
    fn line_without_overflow() {
        assert_eq!(
            line_points(px(i64::MAX - 1, i64::MIN), px(i64::MAX, i64::MIN + 2)),
            pixels(&[
                (i64::MAX - 1, i64::MIN),
                (i64::MAX - 1, i64::MIN + 1),
                (i64::MAX, i64::MIN + 2),
            ]),
        );
    }

    #[test]
    fn point_far_outside_of_canvas() {
        let mut c = Canvas::new(4, 4);
        draw_point(&mut c, px(i64::MIN, i64::MAX), 8, 0);
        draw_point(&mut c, px(i64::MAX, i64::MIN), u32::MAX, 0);
        assert_eq!(c, Canvas::new(4, 4));

        draw_point(&mut c, px(1, 2), u32::MAX, 0);
        assert_eq!(c.get(0, 0), Some(0));
        assert_eq!(c.get(3, 3), Some(0));
    }

    #[test]
    fn clipped_line_matches_full_line() {
        let (a, b) = (px(-37, -5), px(50, 11));
        let mut expected = Canvas::new(8, 8);
        for p in line_points(a, b) {
            draw_point(&mut expected, p, 2, 0);
        }

        let mut c = Canvas::new(8, 8);
        draw_line(&mut c, a, b, 2, 0);
        assert_eq!(c, expected);
    }

    #[test]
    fn line_between_extreme_pixels() {
        let mut c = Canvas::new(3, 3);
        draw_line(&mut c, px(i64::MIN, i64::MIN), px(i64::MAX, i64::MAX), 1, 0);
        let expected = "P2\n# routemap\n3 3\n255\n0 255 255\n255 0 255\n255 255 0\n";
        assert_eq!(String::from_utf8(c.to_pgm()).unwrap(), expected);

        let mut c = Canvas::new(3, 3);
        draw_line(&mut c, px(1, 0), px(1, i64::MAX), 1, 0);
        let expected = "P2\n# routemap\n3 3\n255\n255 255 255\n0 0 0\n255 255 255\n";
        assert_eq!(String::from_utf8(c.to_pgm()).unwrap(), expected);
    }

    #[test]
    fn thin_line() {
        let mut c = Canvas::new(3, 3);
        draw_line(&mut c, px(0, 0), px(2, 2), 1, 0);
        let expected = "P2\n# routemap\n3 3\n255\n0 255 255\n255 0 255\n255 255 0\n";
        assert_eq!(String::from_utf8(c.to_pgm()).unwrap(), expected);
    }
}
