use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    let a = a as f32;
    let b = b as f32;
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

/// Two-stop vertical gradient painted along a drop's body, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientColor {
    pub top: Rgb,
    pub bottom: Rgb,
}

impl GradientColor {
    /// Color at position `t` along the gradient, 0.0 = top stop, 1.0 = bottom stop.
    pub fn at(&self, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb(
            lerp_u8(self.top.0, self.bottom.0, t),
            lerp_u8(self.top.1, self.bottom.1, t),
            lerp_u8(self.top.2, self.bottom.2, t),
        )
    }
}

/// Palette the rain draws its gradients from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorScheme {
    #[default]
    Rainbow,
    Matrix,
    Fire,
    Ocean,
    Neon,
    Mono,
}

const RAINBOW: &[Rgb] = &[
    Rgb(0xFF, 0x00, 0x00),
    Rgb(0xFF, 0x7F, 0x00),
    Rgb(0xFF, 0xFF, 0x00),
    Rgb(0x00, 0xFF, 0x00),
    Rgb(0x00, 0x00, 0xFF),
    Rgb(0x4B, 0x00, 0x82),
    Rgb(0x94, 0x00, 0xD3),
];

const MATRIX: &[Rgb] = &[
    Rgb(0x00, 0x3B, 0x00),
    Rgb(0x00, 0x80, 0x00),
    Rgb(0x00, 0xC0, 0x00),
    Rgb(0x00, 0xFF, 0x41),
    Rgb(0xB3, 0xFF, 0xB3),
];

const FIRE: &[Rgb] = &[
    Rgb(0x80, 0x00, 0x00),
    Rgb(0xD0, 0x2F, 0x00),
    Rgb(0xFF, 0x6A, 0x00),
    Rgb(0xFF, 0xA5, 0x00),
    Rgb(0xFF, 0xE0, 0x66),
];

const OCEAN: &[Rgb] = &[
    Rgb(0x02, 0x23, 0x5E),
    Rgb(0x06, 0x47, 0x8F),
    Rgb(0x0E, 0x6B, 0xA8),
    Rgb(0x2E, 0x9C, 0xCA),
    Rgb(0x8F, 0xE3, 0xF0),
];

const NEON: &[Rgb] = &[
    Rgb(0xFF, 0x00, 0xFF),
    Rgb(0x00, 0xFF, 0xFF),
    Rgb(0x39, 0xFF, 0x14),
    Rgb(0xFF, 0xF0, 0x00),
];

const MONO: &[Rgb] = &[
    Rgb(0x40, 0x40, 0x40),
    Rgb(0x80, 0x80, 0x80),
    Rgb(0xC0, 0xC0, 0xC0),
    Rgb(0xFF, 0xFF, 0xFF),
];

impl ColorScheme {
    pub fn name(&self) -> &str {
        match self {
            ColorScheme::Rainbow => "Rainbow",
            ColorScheme::Matrix => "Matrix",
            ColorScheme::Fire => "Fire",
            ColorScheme::Ocean => "Ocean",
            ColorScheme::Neon => "Neon",
            ColorScheme::Mono => "Mono",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ColorScheme::Rainbow => ColorScheme::Matrix,
            ColorScheme::Matrix => ColorScheme::Fire,
            ColorScheme::Fire => ColorScheme::Ocean,
            ColorScheme::Ocean => ColorScheme::Neon,
            ColorScheme::Neon => ColorScheme::Mono,
            ColorScheme::Mono => ColorScheme::Rainbow,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            ColorScheme::Rainbow => ColorScheme::Mono,
            ColorScheme::Matrix => ColorScheme::Rainbow,
            ColorScheme::Fire => ColorScheme::Matrix,
            ColorScheme::Ocean => ColorScheme::Fire,
            ColorScheme::Neon => ColorScheme::Ocean,
            ColorScheme::Mono => ColorScheme::Neon,
        }
    }

    pub fn palette(&self) -> &'static [Rgb] {
        match self {
            ColorScheme::Rainbow => RAINBOW,
            ColorScheme::Matrix => MATRIX,
            ColorScheme::Fire => FIRE,
            ColorScheme::Ocean => OCEAN,
            ColorScheme::Neon => NEON,
            ColorScheme::Mono => MONO,
        }
    }

    /// Draw a fresh gradient: a random palette entry as the top stop and the
    /// cyclically-next entry as the bottom stop.
    pub fn pick_gradient<R: Rng>(&self, rng: &mut R) -> GradientColor {
        let palette = self.palette();
        let idx = rng.gen_range(0..palette.len());
        GradientColor {
            top: palette[idx],
            bottom: palette[(idx + 1) % palette.len()],
        }
    }
}
