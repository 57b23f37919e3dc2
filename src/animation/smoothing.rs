use glam::Vec2;

use crate::input::KeyState;

/// Tuning for the input-to-position smoother.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingSettings {
    /// Fraction of the remaining distance still left after one second.
    pub decay_base: f32,
    /// Per-axis scale applied when both axes are deflected.
    pub diagonal_scale: f32,
}

impl Default for SmoothingSettings {
    fn default() -> Self {
        Self {
            decay_base: 0.1,
            diagonal_scale: 0.707_106_78,
        }
    }
}

impl SmoothingSettings {
    #[must_use]
    pub fn with_decay_base(mut self, decay_base: f32) -> Self {
        self.decay_base = decay_base;
        self
    }

    #[must_use]
    pub fn with_diagonal_scale(mut self, diagonal_scale: f32) -> Self {
        self.diagonal_scale = diagonal_scale;
        self
    }
}

/// Frame-rate independent interpolation weight: `1 - decay_base^dt`.
///
/// Zero for `dt <= 0` or a non-finite `dt`.
#[must_use]
pub fn smoothing_factor(decay_base: f32, dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    (1.0 - decay_base.powf(dt)).clamp(0.0, 1.0)
}

/// Raw look direction for the held keys. Up is +Y, Right is +X.
#[must_use]
pub fn target_direction(keys: &KeyState, diagonal_scale: f32) -> Vec2 {
    let mut target = Vec2::ZERO;

    if keys.left {
        target.x -= 1.0;
    }
    if keys.right {
        target.x += 1.0;
    }
    if keys.up {
        target.y += 1.0;
    }
    if keys.down {
        target.y -= 1.0;
    }

    if target.x != 0.0 && target.y != 0.0 {
        target *= diagonal_scale;
    }

    target
}

/// Exponential-decay follower for the look direction.
///
/// `position` carries across frames; `target` is recomputed every step.
#[derive(Debug, Clone, Default)]
pub struct PoseSmoother {
    settings: SmoothingSettings,
    position: Vec2,
    target: Vec2,
}

impl PoseSmoother {
    #[must_use]
    pub fn new(settings: SmoothingSettings) -> Self {
        Self {
            settings,
            position: Vec2::ZERO,
            target: Vec2::ZERO,
        }
    }

    /// Advances one frame and returns the smoothing factor used.
    pub fn step(&mut self, keys: &KeyState, dt: f32) -> f32 {
        self.target = target_direction(keys, self.settings.diagonal_scale);
        let factor = smoothing_factor(self.settings.decay_base, dt);
        self.position += (self.target - self.position) * factor;
        factor
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    #[must_use]
    pub fn settings(&self) -> &SmoothingSettings {
        &self.settings
    }

    pub fn reset(&mut self) {
        self.position = Vec2::ZERO;
        self.target = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn keys(up: bool, down: bool, left: bool, right: bool) -> KeyState {
        KeyState { up, down, left, right }
    }

    #[test]
    fn factor_is_zero_without_elapsed_time() {
        assert_eq!(smoothing_factor(0.1, 0.0), 0.0);
        assert_eq!(smoothing_factor(0.1, -0.5), 0.0);
        assert_eq!(smoothing_factor(0.1, f32::NAN), 0.0);
    }

    #[test]
    fn factor_after_one_second_closes_ninety_percent() {
        assert!((smoothing_factor(0.1, 1.0) - 0.9).abs() < EPSILON);
    }

    #[test]
    fn opposite_keys_cancel() {
        assert_eq!(target_direction(&keys(true, true, true, true), 0.707_106_78), Vec2::ZERO);
        assert_eq!(target_direction(&keys(false, false, true, true), 0.707_106_78), Vec2::ZERO);
    }

    #[test]
    fn single_axis_is_not_scaled() {
        assert_eq!(target_direction(&keys(false, true, false, false), 0.707_106_78), Vec2::new(0.0, -1.0));
        assert_eq!(target_direction(&keys(false, false, false, true), 0.707_106_78), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn smoother_holds_still_at_zero_dt() {
        let mut smoother = PoseSmoother::new(SmoothingSettings::default());
        let f = smoother.step(&keys(true, false, false, false), 0.0);
        assert_eq!(f, 0.0);
        assert_eq!(smoother.position(), Vec2::ZERO);
        assert_eq!(smoother.target(), Vec2::Y);
    }
}
