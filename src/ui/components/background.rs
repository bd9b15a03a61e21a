use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

use crate::{ui::state::Theme, util::colors};

const CROSS_STEP_X: u16 = 4;
const CROSS_STEP_Y: u16 = 2;

/// Paints the backdrop for the active theme.
pub struct Background {
    theme: Theme,
}

impl Background {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Widget for Background {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        if self.theme != Theme::Crosses {
            return;
        }

        let style = Style::new().fg(colors::CROSSES).bg(colors::BACKGROUND);
        for y in (area.top()..area.bottom()).step_by(CROSS_STEP_Y as usize) {
            for x in (area.left()..area.right()).step_by(CROSS_STEP_X as usize) {
                buf[(x, y)].set_symbol("+").set_style(style);
            }
        }
    }
}
