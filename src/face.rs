//! Geometry of the 64x64 clock face.
//!
//! Angles are in degrees, measured clockwise from the positive x axis the way
//! screen coordinates run, so 12 o'clock sits at -90.

pub const CANVAS_SIZE: u32 = 64;
pub const RADIUS: f32 = 32.0;
pub const CENTER: Point = Point::new(32.0, 32.0);

/// Fraction of the radius where hour markers and the minute dot sit.
pub const MARKER_RING: f32 = 0.9375;
/// Fraction of the radius covered by the hour hand.
pub const HOUR_HAND_LENGTH: f32 = 0.75;

pub const HOUR_MARKER_COUNT: usize = 12;

const TWELVE_O_CLOCK: f32 = -90.0;
const DEGREES_PER_HOUR: f32 = 30.0;
const DEGREES_PER_MINUTE: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

pub fn hour_marker_angle(index: usize) -> f32 {
    index as f32 * DEGREES_PER_HOUR + TWELVE_O_CLOCK
}

/// Hour hand angle for a 24h `hour`. The hand creeps forward with the minute,
/// half a degree per minute.
pub fn hour_hand_angle(hour: u32, minute: u32) -> f32 {
    ((hour % 12) as f32 + minute as f32 / 60.0) * DEGREES_PER_HOUR + TWELVE_O_CLOCK
}

pub fn minute_indicator_angle(minute: u32) -> f32 {
    minute as f32 * DEGREES_PER_MINUTE + TWELVE_O_CLOCK
}

/// Maps any angle into `[0, 360)`.
pub fn normalize_degrees(angle: f32) -> f32 {
    angle.rem_euclid(360.0)
}

pub fn point_on_ring(angle: f32, fraction: f32) -> Point {
    let radians = angle.to_radians();
    let distance = RADIUS * fraction;
    Point::new(
        CENTER.x + distance * radians.cos(),
        CENTER.y + distance * radians.sin(),
    )
}

pub fn hour_markers() -> [Point; HOUR_MARKER_COUNT] {
    std::array::from_fn(|i| point_on_ring(hour_marker_angle(i), MARKER_RING))
}

pub fn hour_hand_tip(hour: u32, minute: u32) -> Point {
    point_on_ring(hour_hand_angle(hour, minute), HOUR_HAND_LENGTH)
}

pub fn minute_indicator(minute: u32) -> Point {
    point_on_ring(minute_indicator_angle(minute), MARKER_RING)
}
