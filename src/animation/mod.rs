//! Eye-tracking animation.
//!
//! Three stages run once per frame:
//!
//! 1. [`target_direction`]: held arrow keys to a raw 2D direction
//! 2. [`PoseSmoother`]: exponential decay toward that direction, scaled by
//!    elapsed time rather than frame count
//! 3. [`apply_pose`]: smoothed direction to pupil offsets and body rotation
//!
//! [`EyeTrackingAnimator`] chains them and owns the state carried between
//! frames.

pub mod animator;
pub mod pose;
pub mod smoothing;

pub use animator::EyeTrackingAnimator;
pub use pose::{MascotRig, PoseSettings, apply_pose, body_target, eye_offset};
pub use smoothing::{PoseSmoother, SmoothingSettings, smoothing_factor, target_direction};
