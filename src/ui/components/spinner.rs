use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};
use unicode_width::UnicodeWidthStr;

use crate::ui::util::animation_clock;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_MS: u128 = 100;

/// Braille spinner with an optional label, centred in its area.
#[derive(Default)]
pub struct Spinner<'a> {
    style: Style,
    label: Option<&'a str>,
}

impl<'a> Spinner<'a> {
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }
}

impl Widget for Spinner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let symbol = FRAMES[(animation_clock() / FRAME_MS) as usize % FRAMES.len()];
        let text = match self.label {
            Some(label) => format!("{symbol} {label}"),
            None => symbol.to_string(),
        };

        let width = (text.width() as u16).min(area.width);
        let x = area.x + (area.width - width) / 2;
        let y = area.y + area.height / 2;
        buf.set_stringn(x, y, &text, area.width as usize, self.style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_centred() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        Spinner::default().with_label("WAIT").render(area, &mut buf);

        // "⠋ WAIT" is six cells wide, so it starts at column 7.
        assert_eq!(buf[(9, 1)].symbol(), "W");
        assert_eq!(buf[(12, 1)].symbol(), "T");
    }

    #[test]
    fn empty_area_is_a_no_op() {
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        Spinner::default().render(area, &mut buf);
    }
}
