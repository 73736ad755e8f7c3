//! Sinks that receive sampled points on behalf of a host.
//!
//! A host turns points into visible objects by implementing [`PlacementSink`]. The
//! sampler calls [`PlacementSink::place`] once per run with the final sequence, and the
//! host's "clear" action maps to [`PlacementSink::clear`].
use crate::domain::Point;

/// Receives the final point sequence of a run.
pub trait PlacementSink {
    /// Instantiates a representation for every point, in order.
    fn place(&mut self, points: &[Point]);

    /// Discards everything placed so far.
    fn clear(&mut self);
}

/// A no-op placement sink.
impl PlacementSink for () {
    #[inline]
    fn place(&mut self, _points: &[Point]) {}

    #[inline]
    fn clear(&mut self) {}
}

/// Keeps every placed point, accumulating across runs until cleared.
#[derive(Debug, Default, Clone)]
pub struct PointCollector {
    points: Vec<Point>,
}

impl PointCollector {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<Point> {
        self.points
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl PlacementSink for PointCollector {
    fn place(&mut self, points: &[Point]) {
        self.points.extend_from_slice(points);
    }

    fn clear(&mut self) {
        self.points.clear();
    }
}

/// Forwards placements to a closure. `clear` runs the optional clear callback.
pub struct FnPlacement<P, C = fn()>
where
    P: FnMut(&[Point]),
    C: FnMut(),
{
    place: P,
    clear: Option<C>,
}

impl<P> FnPlacement<P>
where
    P: FnMut(&[Point]),
{
    pub fn new(place: P) -> Self {
        Self { place, clear: None }
    }
}

impl<P, C> FnPlacement<P, C>
where
    P: FnMut(&[Point]),
    C: FnMut(),
{
    pub fn with_clear(place: P, clear: C) -> Self {
        Self {
            place,
            clear: Some(clear),
        }
    }
}

impl<P, C> PlacementSink for FnPlacement<P, C>
where
    P: FnMut(&[Point]),
    C: FnMut(),
{
    #[inline]
    fn place(&mut self, points: &[Point]) {
        (self.place)(points);
    }

    #[inline]
    fn clear(&mut self) {
        if let Some(clear) = self.clear.as_mut() {
            clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    #[test]
    fn collector_accumulates_until_cleared() {
        let mut sink = PointCollector::new();
        assert!(sink.is_empty());
        sink.place(&[Vec2::new(1.0, 2.0)]);
        sink.place(&[Vec2::new(3.0, 4.0), Vec2::new(5.0, 6.0)]);
        assert_eq!(sink.len(), 3);
        assert_eq!(sink.as_slice()[1], Vec2::new(3.0, 4.0));

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn fn_placement_invokes_callbacks() {
        let mut placed = 0;
        let mut cleared = 0;
        {
            let mut sink = FnPlacement::with_clear(
                |points: &[Point]| placed += points.len(),
                || cleared += 1,
            );
            sink.place(&[Vec2::ZERO, Vec2::ONE]);
            sink.clear();
        }
        assert_eq!(placed, 2);
        assert_eq!(cleared, 1);
    }

    #[test]
    fn fn_placement_without_clear_is_noop_on_clear() {
        let mut count = 0;
        let mut sink = FnPlacement::new(|points: &[Point]| count += points.len());
        sink.clear();
        sink.place(&[Vec2::ZERO]);
        drop(sink);
        assert_eq!(count, 1);
    }

    #[test]
    fn unit_sink_ignores_everything() {
        let mut sink = ();
        sink.place(&[Vec2::ZERO]);
        sink.clear();
    }
}
