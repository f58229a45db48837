use crossterm::style::Color as TermColor;

use cellgrid::color::Color;

pub trait TermColorExt {
    fn to_term(&self) -> TermColor;
}

impl TermColorExt for Color {
    fn to_term(&self) -> TermColor {
        TermColor::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}
