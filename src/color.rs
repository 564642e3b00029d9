// Two-entry palette for the point cloud, and the RGB triple each entry maps to

use rand::Rng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    // Canvas fill style, e.g. "rgba(102, 252, 241, 0.75)"
    pub fn to_rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    Cyan,
    Teal,
}

impl Palette {
    pub const CYAN: Color = Color::new(102, 252, 241);
    pub const TEAL: Color = Color::new(69, 162, 158);

    pub fn color(self) -> Color {
        match self {
            Palette::Cyan => Palette::CYAN,
            Palette::Teal => Palette::TEAL,
        }
    }

    // Even odds between the two entries
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Palette {
        if rng.gen::<f64>() > 0.5 {
            Palette::Cyan
        } else {
            Palette::Teal
        }
    }
}
