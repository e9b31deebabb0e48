use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderChar {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Horizontal,
    Vertical,
}

impl BorderChar {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        use theme::{borders as u, borders_ascii as a};

        let (unicode, ascii) = match self {
            BorderChar::TopLeft => (u::TOP_LEFT, a::TOP_LEFT),
            BorderChar::TopRight => (u::TOP_RIGHT, a::TOP_RIGHT),
            BorderChar::BottomLeft => (u::BOTTOM_LEFT, a::BOTTOM_LEFT),
            BorderChar::BottomRight => (u::BOTTOM_RIGHT, a::BOTTOM_RIGHT),
            BorderChar::Horizontal => (u::HORIZONTAL, a::HORIZONTAL),
            BorderChar::Vertical => (u::VERTICAL, a::VERTICAL),
        };
        if supports_unicode {
            unicode
        } else {
            ascii
        }
    }
}
