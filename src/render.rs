use crate::face::{self, Point, CANVAS_SIZE};
use crate::theme::Theme;
use chrono::{NaiveTime, Timelike};
use image::{Rgba, RgbaImage};

/// Opacity of the twelve hour markers (75%).
pub const MARKER_ALPHA: u8 = 192;
const MARKER_DIAMETER: f32 = 2.0;
const MARKER_STROKE_WIDTH: f32 = 2.0;
const HOUR_HAND_WIDTH: f32 = 5.0;
const MINUTE_INDICATOR_DIAMETER: f32 = 10.0;

/// Draws the clock face for `time` on a transparent 64x64 canvas. Seconds are
/// ignored, so every call within the same minute yields identical pixels.
pub fn render(time: NaiveTime, theme: Theme) -> RgbaImage {
    let mut canvas = RgbaImage::new(CANVAS_SIZE, CANVAS_SIZE);
    let foreground = theme.foreground();

    let mut marker_color = foreground;
    marker_color.0[3] = MARKER_ALPHA;
    for marker in face::hour_markers() {
        stroke_circle(
            &mut canvas,
            marker,
            MARKER_DIAMETER / 2.0,
            MARKER_STROKE_WIDTH,
            marker_color,
        );
    }

    let tip = face::hour_hand_tip(time.hour(), time.minute());
    stroke_line(&mut canvas, face::CENTER, tip, HOUR_HAND_WIDTH, foreground);

    fill_circle(
        &mut canvas,
        face::minute_indicator(time.minute()),
        MINUTE_INDICATOR_DIAMETER / 2.0,
        foreground,
    );

    canvas
}

/// Half-open pixel bounds `[x0, x1) x [y0, y1)` clamped to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelRect {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl PixelRect {
    fn around(a: Point, b: Point, pad: f32, width: u32, height: u32) -> Option<Self> {
        let clamp = |v: f32, max: u32| v.clamp(0.0, max as f32) as u32;
        let rect = PixelRect {
            x0: clamp((a.x.min(b.x) - pad).floor(), width),
            y0: clamp((a.y.min(b.y) - pad).floor(), height),
            x1: clamp((a.x.max(b.x) + pad).ceil(), width),
            y1: clamp((a.y.max(b.y) + pad).ceil(), height),
        };
        if rect.x1 <= rect.x0 || rect.y1 <= rect.y0 {
            return None;
        }
        Some(rect)
    }
}

/// Samples `coverage` at every pixel center inside `bounds` and blends
/// `color` over the canvas proportionally.
fn paint(
    canvas: &mut RgbaImage,
    bounds: PixelRect,
    color: Rgba<u8>,
    coverage: impl Fn(Point) -> f32,
) {
    for y in bounds.y0..bounds.y1 {
        for x in bounds.x0..bounds.x1 {
            let amount = coverage(Point::new(x as f32 + 0.5, y as f32 + 0.5));
            if amount > 0.0 {
                blend(canvas.get_pixel_mut(x, y), color, amount.min(1.0));
            }
        }
    }
}

/// Source-over compositing with straight (non-premultiplied) alpha.
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f32) {
    let src_a = src.0[3] as f32 / 255.0 * coverage;
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst.0[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    for c in 0..3 {
        let mixed =
            (src.0[c] as f32 * src_a + dst.0[c] as f32 * dst_a * (1.0 - src_a)) / out_a;
        dst.0[c] = mixed.round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// One-pixel wide linear ramp across an edge at signed distance `inside`.
fn edge(inside: f32) -> f32 {
    (inside + 0.5).clamp(0.0, 1.0)
}

fn fill_circle(canvas: &mut RgbaImage, center: Point, radius: f32, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    let Some(bounds) = PixelRect::around(center, center, radius + 1.0, width, height) else {
        return;
    };
    paint(canvas, bounds, color, |p| edge(radius - p.distance(center)));
}

/// Strokes the outline of a circle. When the stroke is at least as wide as the
/// diameter the outline closes up into a solid dot.
fn stroke_circle(
    canvas: &mut RgbaImage,
    center: Point,
    radius: f32,
    stroke_width: f32,
    color: Rgba<u8>,
) {
    let half = stroke_width / 2.0;
    let outer = radius + half;
    let inner = radius - half;
    let (width, height) = canvas.dimensions();
    let Some(bounds) = PixelRect::around(center, center, outer + 1.0, width, height) else {
        return;
    };
    paint(canvas, bounds, color, |p| {
        let d = p.distance(center);
        let hole = if inner > 0.0 { edge(d - inner) } else { 1.0 };
        edge(outer - d) * hole
    });
}

/// Strokes a straight segment with flat caps.
fn stroke_line(
    canvas: &mut RgbaImage,
    start: Point,
    end: Point,
    stroke_width: f32,
    color: Rgba<u8>,
) {
    let length = start.distance(end);
    if length <= f32::EPSILON {
        return;
    }
    let half = stroke_width / 2.0;
    let (width, height) = canvas.dimensions();
    let Some(bounds) = PixelRect::around(start, end, half + 1.0, width, height) else {
        return;
    };
    let ux = (end.x - start.x) / length;
    let uy = (end.y - start.y) / length;
    paint(canvas, bounds, color, |p| {
        let wx = p.x - start.x;
        let wy = p.y - start.y;
        let along = wx * ux + wy * uy;
        let across = (wy * ux - wx * uy).abs();
        edge(half - across) * edge(along.min(length - along))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn canvas_is_64_square() {
        let img = render(at(10, 10), Theme::Dark);
        assert_eq!(img.dimensions(), (64, 64));
    }

    #[test]
    fn corners_stay_transparent() {
        let img = render(at(7, 45), Theme::Light);
        for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
            assert_eq!(img.get_pixel(x, y).0[3], 0, "pixel ({x},{y})");
        }
    }

    #[test]
    fn seconds_do_not_change_pixels() {
        let a = render(NaiveTime::from_hms_opt(9, 41, 0).unwrap(), Theme::Dark);
        let b = render(NaiveTime::from_hms_opt(9, 41, 59).unwrap(), Theme::Dark);
        assert_eq!(a, b);
    }

    #[test]
    fn blend_onto_transparent_keeps_source_color() {
        let mut px = Rgba([0, 0, 0, 0]);
        blend(&mut px, Rgba([255, 255, 255, 192]), 1.0);
        assert_eq!(px, Rgba([255, 255, 255, 192]));
    }

    #[test]
    fn blend_opaque_source_replaces_destination() {
        let mut px = Rgba([255, 255, 255, 192]);
        blend(&mut px, Rgba([0, 0, 0, 255]), 1.0);
        assert_eq!(px, Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn zero_coverage_leaves_pixel_untouched() {
        let mut px = Rgba([1, 2, 3, 4]);
        blend(&mut px, Rgba([255, 255, 255, 255]), 0.0);
        assert_eq!(px, Rgba([1, 2, 3, 4]));
    }

    #[test]
    fn pixel_rect_is_clamped_to_canvas() {
        let rect = PixelRect::around(Point::new(-10.0, -10.0), Point::new(2.0, 3.0), 1.0, 64, 64)
            .expect("partially visible");
        assert_eq!((rect.x0, rect.y0, rect.x1, rect.y1), (0, 0, 3, 4));

        assert!(PixelRect::around(Point::new(-10.0, -10.0), Point::new(-5.0, -5.0), 1.0, 64, 64)
            .is_none());
    }

    #[test]
    fn horizontal_hand_has_width_five() {
        let mut canvas = RgbaImage::new(64, 64);
        stroke_line(
            &mut canvas,
            Point::new(32.0, 32.0),
            Point::new(56.0, 32.0),
            5.0,
            Rgba([255, 255, 255, 255]),
        );
        let column: Vec<u8> = (0..64).map(|y| canvas.get_pixel(44, y).0[3]).collect();
        let opaque = column.iter().filter(|a| **a == 255).count();
        assert_eq!(opaque, 4);
        assert!(column.iter().filter(|a| **a > 0).count() >= 5);
        assert_eq!(canvas.get_pixel(58, 32).0[3], 0);
    }

    #[test]
    fn filled_circle_is_opaque_at_center() {
        let mut canvas = RgbaImage::new(64, 64);
        fill_circle(&mut canvas, Point::new(20.0, 20.0), 5.0, Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(20, 20).0[3], 255);
        assert_eq!(canvas.get_pixel(27, 20).0[3], 0);
    }

    #[test]
    fn thin_ring_keeps_hole() {
        let mut canvas = RgbaImage::new(64, 64);
        stroke_circle(&mut canvas, Point::new(32.0, 32.0), 10.0, 2.0, Rgba([0, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(32, 32).0[3], 0);
        assert!(canvas.get_pixel(41, 31).0[3] > 0);
    }
}
