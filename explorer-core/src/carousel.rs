//! The hero carousel as a pure state machine. Timing lives in
//! [`crate::autoplay`].

use serde::Serialize;

use crate::common::error::{ExplorerError, Result};

/// Hero carousel state: which of `len` slides is showing.
///
/// Transitions take and return the state by value so views can hold it as
/// plain data and tests can drive it without a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(ExplorerError::EmptyCarousel);
        }
        Ok(Self { index: 0, len })
    }

    /// Starts at `index`, or at slide 0 when `index` is out of range.
    pub fn starting_at(len: usize, index: usize) -> Result<Self> {
        let carousel = Self::new(len)?;
        Ok(carousel.go_to(index).unwrap_or(carousel))
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn slide_count(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self {
            index: (self.index + 1) % self.len,
            ..self
        }
    }

    #[must_use]
    pub fn previous(self) -> Self {
        Self {
            index: (self.index + self.len - 1) % self.len,
            ..self
        }
    }

    pub fn go_to(self, index: usize) -> Result<Self> {
        if index >= self.len {
            return Err(ExplorerError::SlideOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(Self { index, ..self })
    }

    /// Automatic advance; identical to [`Carousel::next`].
    #[must_use]
    pub fn tick(self) -> Self {
        self.next()
    }

    /// Fraction of the progress bar to fill, `(index + 1) / len`.
    pub fn progress(&self) -> f64 {
        (self.index + 1) as f64 / self.len as f64
    }

    pub fn progress_percent(&self) -> String {
        format!("{:.2}", self.progress() * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_carousel_is_rejected() {
        assert!(matches!(Carousel::new(0), Err(ExplorerError::EmptyCarousel)));
    }

    #[test]
    fn test_three_ticks_wrap_to_start() {
        let start = Carousel::new(3).unwrap();
        assert_eq!(start.index(), 0);
        let after = start.tick().tick().tick();
        assert_eq!(after, start);
        assert_eq!(start.tick().index(), 1);
    }

    #[test]
    fn test_next_then_previous_is_identity() {
        let mut state = Carousel::new(3).unwrap();
        for _ in 0..3 {
            assert_eq!(state.next().previous(), state);
            assert_eq!(state.previous().next(), state);
            state = state.next();
        }
    }

    #[test]
    fn test_previous_wraps_from_zero() {
        let state = Carousel::new(3).unwrap().previous();
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn test_go_to_is_idempotent() {
        let state = Carousel::new(3).unwrap();
        let once = state.go_to(2).unwrap();
        let twice = once.go_to(2).unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.index(), 2);
    }

    #[test]
    fn test_go_to_out_of_range_is_an_error() {
        let state = Carousel::new(3).unwrap();
        match state.go_to(3) {
            Err(ExplorerError::SlideOutOfRange { index, len }) => {
                assert_eq!(index, 3);
                assert_eq!(len, 3);
            }
            other => panic!("expected out of range, got {:?}", other),
        }
    }

    #[test]
    fn test_starting_at_falls_back_to_zero() {
        assert_eq!(Carousel::starting_at(3, 1).unwrap().index(), 1);
        assert_eq!(Carousel::starting_at(3, 7).unwrap().index(), 0);
    }

    #[test]
    fn test_progress_tracks_index() {
        let state = Carousel::new(3).unwrap();
        assert!((state.progress() - 1.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(state.next().next().progress(), 1.0);
        assert_eq!(state.progress_percent(), "33.33");
        assert_eq!(state.next().next().progress_percent(), "100.00");
    }

    #[test]
    fn test_single_slide_stays_put() {
        let state = Carousel::new(1).unwrap();
        assert_eq!(state.next(), state);
        assert_eq!(state.previous(), state);
    }
}
