use palette::{IntoColor, Oklch, Srgb};

/// A fill or stroke color. Interpolated colors come out as `Oklch`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Oklch { l: f32, c: f32, h: f32 },
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Composite `self` over `base` with the given opacity (0.0 to 1.0).
    pub fn over(self, base: Rgb, opacity: f32) -> Rgb {
        let a = opacity.clamp(0.0, 1.0);
        let mix = |top: u8, bottom: u8| -> u8 {
            (top as f32 * a + bottom as f32 * (1.0 - a)).round() as u8
        };
        Rgb::new(mix(self.r, base.r), mix(self.g, base.g), mix(self.b, base.b))
    }
}

impl Color {
    pub const BLACK: Color = Color::Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    /// Look up one of the CSS color keywords used by the chart labs.
    pub fn named(name: &str) -> Option<Self> {
        let (r, g, b) = match name.to_ascii_lowercase().as_str() {
            "black" => (0, 0, 0),
            "white" => (255, 255, 255),
            "red" => (255, 0, 0),
            "blue" => (0, 0, 255),
            "green" => (0, 128, 0),
            "darkred" => (139, 0, 0),
            "steelblue" => (70, 130, 180),
            "tomato" => (255, 99, 71),
            "gold" => (255, 215, 0),
            "lightgreen" => (144, 238, 144),
            "darkorange" => (255, 140, 0),
            "palevioletred" => (219, 112, 147),
            "orange" => (255, 165, 0),
            "gray" | "grey" => (128, 128, 128),
            "lightgray" | "lightgrey" => (211, 211, 211),
            _ => return None,
        };
        Some(Self::rgb(r, g, b))
    }

    pub fn to_rgb(&self) -> Rgb {
        match self {
            Self::Rgb { r, g, b } => Rgb::new(*r, *g, *b),
            Self::Oklch { l, c, h, .. } => oklch_to_rgb(*l, *c, *h),
        }
    }

    /// Lightness, chroma and hue (degrees, 0..360).
    pub fn to_oklch(&self) -> (f32, f32, f32) {
        match self {
            Self::Oklch { l, c, h, .. } => (*l, *c, *h),
            Self::Rgb { r, g, b } => {
                let srgb = Srgb::new(*r as f32 / 255.0, *g as f32 / 255.0, *b as f32 / 255.0);
                let oklch: Oklch = srgb.into_color();
                (oklch.l, oklch.chroma, oklch.hue.into_positive_degrees())
            }
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::rgb(rgb.r, rgb.g, rgb.b)
    }
}

fn oklch_to_rgb(l: f32, c: f32, h: f32) -> Rgb {
    let oklch = Oklch::new(l, c, h);
    let srgb: Srgb = oklch.into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();

    Rgb::new(r, g, b)
}
