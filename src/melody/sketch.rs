use std::time::Duration;

use log::debug;

use crate::melody::{
    cursor::PlaybackCursor,
    stroke::{Point, Stroke, CANVAS_HEIGHT, CANVAS_WIDTH},
};

/// Gain of the melody tone while it plays.
pub const PLAYING_GAIN: f32 = 0.2;

/// A stroke needs more than this many points before it plays by itself.
const AUTOPLAY_MIN_POINTS: usize = 2;

/// What the melody should sound like this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MelodyFrame {
    pub frequency: f32,
    pub phase: f32,
    /// Playhead position on the canvas, for drawing.
    pub playhead: Point,
}

/// The melody screen's drawing surface and its playback.
///
/// ```text
///   begin ──extend*──▶ end ──(> 2 points)──▶ playing ◀──toggle──▶ paused
///     ▲                                         │
///     └───────────────── begin / clear ─────────┘
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sketch {
    stroke: Stroke,
    drawing: bool,
    playing: bool,
    cursor: PlaybackCursor,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new drag. Throws away the old stroke and stops playback.
    pub fn begin(&mut self) {
        self.stroke = Stroke::new();
        self.drawing = true;
        self.playing = false;
        self.cursor.reset();
    }

    /// Add a point to the drag in progress. Ignored when not drawing.
    pub fn extend(&mut self, point: Point) {
        if self.drawing {
            self.stroke.push(point.clamped());
        }
    }

    /// Finish the drag. Playback starts when the stroke is long enough.
    pub fn end(&mut self) {
        if !self.drawing {
            return;
        }
        self.drawing = false;
        self.stroke.freeze();
        if self.stroke.len() > AUTOPLAY_MIN_POINTS {
            debug!("melody stroke finished with {} points", self.stroke.len());
            self.playing = true;
        }
    }

    /// Wipe the canvas and stop.
    pub fn clear(&mut self) {
        self.stroke = Stroke::new();
        self.drawing = false;
        self.playing = false;
    }

    /// Play or pause. Returns the new playing state.
    ///
    /// Nothing happens until a finished stroke with a pitch curve exists.
    pub fn toggle_playback(&mut self) -> bool {
        if self.playing {
            self.playing = false;
        } else if self.stroke.is_frozen() && self.stroke.is_playable() {
            self.playing = true;
        }
        self.playing
    }

    /// Move the playhead and report the pitch to play, if playing.
    pub fn advance(&mut self, elapsed: Duration) -> Option<MelodyFrame> {
        if !self.playing || !self.stroke.is_playable() {
            return None;
        }
        let phase = self.cursor.advance(elapsed);
        let playhead = self.stroke.sample_point(phase);
        Some(MelodyFrame {
            frequency: self.stroke.sample_pitch(phase),
            phase,
            playhead,
        })
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.cursor.set_speed(speed);
    }

    pub fn step_speed(&mut self, steps: i32) {
        self.cursor.step_speed(steps);
    }

    pub fn speed(&self) -> f32 {
        self.cursor.speed()
    }

    pub fn phase(&self) -> f32 {
        self.cursor.phase()
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Where to draw the playhead, once a curve exists.
    pub fn playhead(&self) -> Option<Point> {
        self.stroke
            .is_playable()
            .then(|| self.stroke.sample_point(self.cursor.phase()))
    }
}

/// A rectangle of terminal cells standing in for the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && row >= self.y
            && column < self.x.saturating_add(self.width)
            && row < self.y.saturating_add(self.height)
    }
}

/// Map a terminal cell to canvas coordinates.
///
/// Cell centres are used, so the first and last columns land half a cell in
/// from the canvas edges. Cells outside the viewport are clamped onto it.
pub fn to_canvas(column: u16, row: u16, viewport: Viewport) -> Point {
    let width = viewport.width.max(1) as f32;
    let height = viewport.height.max(1) as f32;
    let fx = (column.saturating_sub(viewport.x) as f32 + 0.5) / width;
    let fy = (row.saturating_sub(viewport.y) as f32 + 0.5) / height;
    Point::new(fx * CANVAS_WIDTH, fy * CANVAS_HEIGHT).clamped()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn draw(sketch: &mut Sketch, points: &[(f32, f32)]) {
        sketch.begin();
        for &(x, y) in points {
            sketch.extend(Point::new(x, y));
        }
        sketch.end();
    }

    #[test]
    fn long_stroke_starts_playing() {
        let mut sketch = Sketch::new();
        draw(&mut sketch, &[(0.0, 400.0), (500.0, 200.0), (1000.0, 0.0)]);
        assert!(sketch.is_playing());

        let frame = sketch.advance(FRAME);
        assert!(frame.is_some_and(|f| f.frequency > 110.0 && f.frequency < 120.0));
    }

    #[test]
    fn two_point_stroke_waits_for_play() {
        let mut sketch = Sketch::new();
        draw(&mut sketch, &[(0.0, 400.0), (1000.0, 0.0)]);
        assert!(!sketch.is_playing());
        assert_eq!(sketch.advance(FRAME), None);

        assert!(sketch.toggle_playback());
        assert!(sketch.advance(FRAME).is_some());
        assert!(!sketch.toggle_playback());
    }

    #[test]
    fn cannot_play_without_a_curve() {
        let mut sketch = Sketch::new();
        assert!(!sketch.toggle_playback());
        draw(&mut sketch, &[(10.0, 10.0)]);
        assert!(!sketch.toggle_playback());
        assert_eq!(sketch.playhead(), None);
    }

    #[test]
    fn new_drag_stops_playback_and_restarts_phase() {
        let mut sketch = Sketch::new();
        draw(&mut sketch, &[(0.0, 0.0), (500.0, 0.0), (1000.0, 0.0)]);
        for _ in 0..10 {
            sketch.advance(FRAME);
        }
        assert!(sketch.phase() > 0.0);

        sketch.begin();
        assert!(!sketch.is_playing());
        assert_eq!(sketch.phase(), 0.0);
        assert!(sketch.stroke().is_empty());
    }

    #[test]
    fn clear_keeps_speed() {
        let mut sketch = Sketch::new();
        sketch.set_speed(2.5);
        draw(&mut sketch, &[(0.0, 0.0), (500.0, 0.0), (1000.0, 0.0)]);
        sketch.clear();
        assert!(!sketch.is_playing());
        assert!(sketch.stroke().is_empty());
        assert_eq!(sketch.speed(), 2.5);
    }

    #[test]
    fn points_outside_canvas_are_clamped() {
        let mut sketch = Sketch::new();
        draw(&mut sketch, &[(-50.0, -10.0), (2000.0, 999.0), (500.0, 200.0)]);
        let points = sketch.stroke().points();
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert_eq!(points[1], Point::new(CANVAS_WIDTH, CANVAS_HEIGHT));
    }

    #[test]
    fn extend_without_begin_is_ignored() {
        let mut sketch = Sketch::new();
        sketch.extend(Point::new(1.0, 1.0));
        assert!(sketch.stroke().is_empty());
    }

    #[test]
    fn viewport_maps_cells_to_canvas() {
        let viewport = Viewport::new(10, 5, 100, 20);
        let top_left = to_canvas(10, 5, viewport);
        assert!((top_left.x - 5.0).abs() < 1e-3);
        assert!((top_left.y - 10.0).abs() < 1e-3);

        let bottom_right = to_canvas(109, 24, viewport);
        assert!((bottom_right.x - 995.0).abs() < 1e-3);
        assert!((bottom_right.y - 390.0).abs() < 1e-3);

        assert!(viewport.contains(50, 10));
        assert!(!viewport.contains(110, 10));
    }
}
