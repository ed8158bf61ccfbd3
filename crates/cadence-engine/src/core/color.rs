/// Straight-alpha RGBA color with channels in `[0, 1]`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Opaque grey of the given intensity, clamped to `[0, 1]`.
    #[inline]
    pub fn grey(level: f32) -> Self {
        let l = level.clamp(0.0, 1.0);
        Self::new(l, l, l, 1.0)
    }

    pub(crate) fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: f64::from(self.r),
            g: f64::from(self.g),
            b: f64::from(self.b),
            a: f64::from(self.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grey_clamps_level() {
        assert_eq!(Color::grey(1.5), Color::new(1.0, 1.0, 1.0, 1.0));
        assert_eq!(Color::grey(-0.2), Color::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn converts_to_wgpu_channels() {
        let c = Color::new(0.5, 0.25, 0.0, 1.0).to_wgpu();
        assert_eq!((c.r, c.g, c.b, c.a), (0.5, 0.25, 0.0, 1.0));
    }
}
