#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Draw-to-Pitch Mapping
=====================

The visitor draws a line across a 1000 × 400 canvas. Reading the line left to
right gives a melody: high on the canvas is a high note, low is a low note.

  y = 0    (top)      880 Hz  (A5)
  y = 200  (middle)   495 Hz
  y = 400  (bottom)   110 Hz  (A2)

  freq = 880 - (y / 400) · (880 - 110)

Sampling at a phase
-------------------

A playhead sweeps phase 0 → 1 across the horizontal span between the FIRST
and LAST points (not the leftmost and rightmost: a stroke drawn right to left
simply plays backwards).

  targetX = first.x + phase · (last.x - first.x)

The first consecutive pair (p1, p2) with p1.x ≤ targetX ≤ p2.x is
interpolated:

        p1 ●
            \        u = (targetX - p1.x) / (p2.x - p1.x)
             ●  ← y  y = p1.y + u · (p2.y - p1.y)
              \
               ● p2

If no pair brackets targetX (the stroke doubled back on itself) the whole
stroke is treated as one segment from first to last. A vertical pair
(p1.x == p2.x) divides by 1 instead of 0, landing exactly on p1.
*/

pub const CANVAS_WIDTH: f32 = 1000.0;
pub const CANVAS_HEIGHT: f32 = 400.0;

/// Pitch at the top of the canvas.
pub const MAX_HZ: f32 = 880.0;
/// Pitch at the bottom of the canvas.
pub const MIN_HZ: f32 = 110.0;

/// A position on the drawing canvas. `y = 0` is the top.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Pull the point back inside the canvas.
    pub fn clamped(self) -> Self {
        Self {
            x: clamp_finite(self.x, CANVAS_WIDTH),
            y: clamp_finite(self.y, CANVAS_HEIGHT),
        }
    }
}

fn clamp_finite(value: f32, max: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    }
}

/// Height on the canvas → frequency in Hz.
pub fn y_to_frequency(y: f32) -> f32 {
    MAX_HZ - (y / CANVAS_HEIGHT) * (MAX_HZ - MIN_HZ)
}

/// Where the playhead sits on the curve at `phase`.
///
/// Fewer than two points is degenerate: a single point is returned as is,
/// an empty stroke sits at the bottom-left corner.
pub fn sample_point(points: &[Point], phase: f32) -> Point {
    let (first, last) = match points {
        [] => return Point::new(0.0, CANVAS_HEIGHT),
        [only] => return *only,
        [first, .., last] => (*first, *last),
    };

    let phase = if phase.is_finite() { phase.clamp(0.0, 1.0) } else { 0.0 };
    let target_x = first.x + phase * (last.x - first.x);

    let (p1, p2) = points
        .windows(2)
        .find(|pair| pair[0].x <= target_x && target_x <= pair[1].x)
        .map(|pair| (pair[0], pair[1]))
        .unwrap_or((first, last));

    let span = p2.x - p1.x;
    let u = (target_x - p1.x) / if span == 0.0 { 1.0 } else { span };

    Point {
        x: p1.x + u * span,
        y: p1.y + u * (p2.y - p1.y),
    }
}

/// Frequency of the drawn melody at `phase`.
pub fn sample_pitch(points: &[Point], phase: f32) -> f32 {
    y_to_frequency(sample_point(points, phase).y)
}

/// One continuous drag on the canvas.
///
/// Points are appended while the drag lasts; once frozen the stroke never
/// changes again.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stroke {
    points: Vec<Point>,
    frozen: bool,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an already frozen stroke.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            frozen: true,
        }
    }

    /// Append a point. Returns false when the stroke is frozen.
    pub fn push(&mut self, point: Point) -> bool {
        if self.frozen {
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// At least two points, so a pitch curve exists.
    pub fn is_playable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn sample_pitch(&self, phase: f32) -> f32 {
        sample_pitch(&self.points, phase)
    }

    pub fn sample_point(&self, phase: f32) -> Point {
        sample_point(&self.points, phase)
    }
}
