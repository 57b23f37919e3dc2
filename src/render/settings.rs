//! Renderer settings.

/// sRGB colour with straight alpha, components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// From 8-bit channels plus an alpha in `0.0..=1.0`.
    #[must_use]
    pub fn from_u8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            a,
        )
    }

    /// Source-over composite onto an opaque background.
    #[must_use]
    pub fn over(self, background: Rgba) -> Rgba {
        let a = self.a.clamp(0.0, 1.0);
        Rgba::new(
            self.r * a + background.r * (1.0 - a),
            self.g * a + background.g * (1.0 - a),
            self.b * a + background.b * (1.0 - a),
            1.0,
        )
    }

    /// Linear-space clear colour for an sRGB render target.
    #[must_use]
    pub fn to_linear_color(self) -> wgpu::Color {
        wgpu::Color {
            r: f64::from(srgb_to_linear(self.r)),
            g: f64::from(srgb_to_linear(self.g)),
            b: f64::from(srgb_to_linear(self.b)),
            a: f64::from(self.a),
        }
    }
}

#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Background behind the scene (#1a1a1a).
    pub clear_color: Rgba,
    /// Shown instead of the scene while the model loads.
    pub overlay_color: Rgba,
    pub vsync: bool,
    pub depth_format: wgpu::TextureFormat,
    pub power_preference: wgpu::PowerPreference,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_color: Rgba::from_u8(0x1a, 0x1a, 0x1a, 1.0),
            overlay_color: Rgba::from_u8(20, 20, 30, 0.95),
            vsync: true,
            depth_format: wgpu::TextureFormat::Depth32Float,
            power_preference: wgpu::PowerPreference::HighPerformance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_composites_over_background() {
        let settings = RenderSettings::default();
        let c = settings.overlay_color.over(settings.clear_color);
        let expected_r = (20.0 * 0.95 + 26.0 * 0.05) / 255.0;
        assert!((c.r - expected_r).abs() < 1e-5);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn srgb_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    }
}
