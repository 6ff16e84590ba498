//! Steering input adapter
//!
//! Face tracking reports arrive asynchronously from the camera callback.
//! Only the most recent report matters; the game loop reads whatever is in
//! the mailbox at tick time.

use std::cell::Cell;
use std::rc::Rc;

/// Gain from face displacement (fraction of frame width) to steering offset
pub const HEAD_SENSITIVITY: f32 = 3.0;

/// Convert a face bounding-box center (normalized camera x in [0, 1]) into
/// a steering offset in [-1, 1].
///
/// The camera image is mirrored relative to the player, so a face left of
/// frame center (x < 0.5) steers right (positive).
pub fn offset_from_face_center(x_center: f32) -> Option<f32> {
    if !x_center.is_finite() {
        return None;
    }
    Some(((0.5 - x_center) * HEAD_SENSITIVITY).clamp(-1.0, 1.0))
}

/// Latest-sample-wins buffer shared between the tracker callback and the loop
#[derive(Debug, Clone, Default)]
pub struct SampleMailbox {
    latest: Rc<Cell<Option<f32>>>,
}

impl SampleMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a face detection; replaces any unread sample
    pub fn post_face(&self, x_center: f32) {
        self.latest.set(offset_from_face_center(x_center));
    }

    /// Record a raw offset directly
    pub fn post_offset(&self, offset: Option<f32>) {
        self.latest.set(offset);
    }

    /// No face in the last camera frame
    pub fn post_lost(&self) {
        self.latest.set(None);
    }

    /// Sample for the current tick. Not consumed: a slow tracker keeps
    /// steering with its last report until it says the face is lost.
    pub fn latest(&self) -> Option<f32> {
        self.latest.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_zero() {
        assert_eq!(offset_from_face_center(0.5), Some(0.0));
    }

    #[test]
    fn test_sign_convention() {
        let left = offset_from_face_center(0.4).unwrap();
        assert!((left - 0.3).abs() < 1e-5);
        let right = offset_from_face_center(0.6).unwrap();
        assert!((right + 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_saturates() {
        assert_eq!(offset_from_face_center(0.0), Some(1.0));
        assert_eq!(offset_from_face_center(1.0), Some(-1.0));
        assert_eq!(offset_from_face_center(f32::NAN), None);
    }

    #[test]
    fn test_latest_sample_wins() {
        let mailbox = SampleMailbox::new();
        let tracker = mailbox.clone();
        assert_eq!(mailbox.latest(), None);

        tracker.post_offset(Some(0.2));
        tracker.post_offset(Some(-0.7));
        assert_eq!(mailbox.latest(), Some(-0.7));
        // Still there on the next tick
        assert_eq!(mailbox.latest(), Some(-0.7));

        tracker.post_lost();
        assert_eq!(mailbox.latest(), None);
    }
}
