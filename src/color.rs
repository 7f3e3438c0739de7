/// An RGBA color with components in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const CLEAR: Color = Color::new(0., 0., 0., 0.);
    pub const BLACK: Color = Color::new(0., 0., 0., 1.);
    pub const WHITE: Color = Color::new(1., 1., 1., 1.);

    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Color {
        Color { r, g, b, a }
    }

    /// An opaque color.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b, a: 1. }
    }

    /// Linearly interpolates towards `other`; `t` is clamped to `0..=1`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.max(0.).min(1.);
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

#[test]
fn test_color_lerp() {
    let red = Color::rgb(1., 0., 0.);
    let blue = Color::rgb(0., 0., 1.);
    assert_eq!(red.lerp(blue, 0.), red);
    assert_eq!(red.lerp(blue, 1.), blue);
    assert_eq!(red.lerp(blue, 0.5), Color::rgb(0.5, 0., 0.5));
    assert_eq!(red.lerp(blue, 7.), blue, "t should be clamped");
}
