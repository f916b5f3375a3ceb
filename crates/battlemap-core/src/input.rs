//! Input plumbing: pointer events, resize debouncing and viewport panning.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Quiet period before a coalesced resize measurement is applied.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(300);

/// Pointer event in raw screen coordinates, as delivered by the host
/// surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Move { position: Point },
    Click { position: Point },
}

/// Trailing-edge debouncer for expensive host-layout measurements.
///
/// Rapid pushes coalesce; only the latest value survives, and it becomes
/// available once the quiet period has elapsed without another push. Time is
/// passed in explicitly so the host's event loop stays in control and tests
/// stay deterministic.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<T>,
    deadline: Option<Instant>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
            deadline: None,
        }
    }

    /// Record a value, superseding any pending one, and restart the quiet
    /// period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(value);
        self.deadline = Some(now + self.quiet);
    }

    /// Take the pending value if the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(RESIZE_DEBOUNCE)
    }
}

/// Optimistic viewport pan.
///
/// While the drag is in progress only a visual translation is derived; the
/// authoritative viewport position is computed once, at release, so the
/// scene's notification pipeline fires a single time per pan.
#[derive(Debug, Clone, Copy)]
pub struct PanGesture {
    /// Viewport position when the drag started.
    origin_xy: Point,
    /// Pointer position when the drag started, in screen coordinates.
    origin_pointer: Point,
}

impl PanGesture {
    pub fn begin(viewport_xy: Point, pointer: Point) -> Self {
        Self {
            origin_xy: viewport_xy,
            origin_pointer: pointer,
        }
    }

    /// Visual surface translation for the current pointer position. Applied
    /// by the host on every move without touching scene state.
    pub fn translation(&self, pointer: Point) -> Vec2 {
        pointer - self.origin_pointer
    }

    /// The viewport position this drag would commit; dragging the surface
    /// right moves the viewport left.
    pub fn target_xy(&self, pointer: Point) -> Point {
        self.origin_xy - self.translation(pointer)
    }

    /// Finish the drag, yielding the position to store (the scene clamps it
    /// on write).
    pub fn release(self, pointer: Point) -> Point {
        self.target_xy(pointer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debouncer_trailing_value_wins() {
        let mut debouncer: Debouncer<u32> = Debouncer::default();
        let base = Instant::now();
        debouncer.push(1, base);
        debouncer.push(2, base + Duration::from_millis(100));
        // First deadline has passed, but the second push restarted it.
        assert_eq!(debouncer.poll(base + Duration::from_millis(350)), None);
        assert_eq!(debouncer.poll(base + Duration::from_millis(400)), Some(2));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_debouncer_quiet_period() {
        let mut debouncer: Debouncer<u32> = Debouncer::new(Duration::from_millis(300));
        let base = Instant::now();
        debouncer.push(7, base);
        assert_eq!(debouncer.poll(base + Duration::from_millis(299)), None);
        assert_eq!(debouncer.poll(base + Duration::from_millis(300)), Some(7));
        // Nothing pending afterwards.
        assert_eq!(debouncer.poll(base + Duration::from_millis(600)), None);
    }

    #[test]
    fn test_pan_translation_and_commit() {
        let pan = PanGesture::begin(Point::new(400.0, 200.0), Point::new(100.0, 100.0));
        let translation = pan.translation(Point::new(150.0, 80.0));
        assert!((translation.x - 50.0).abs() < f64::EPSILON);
        assert!((translation.y + 20.0).abs() < f64::EPSILON);

        let committed = pan.release(Point::new(150.0, 80.0));
        assert!((committed.x - 350.0).abs() < f64::EPSILON);
        assert!((committed.y - 220.0).abs() < f64::EPSILON);
    }
}
