use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Widget},
};

use crate::{
    ui::{state::Tab, util::animation_clock},
    util::colors,
};

pub const BRAND: &str = "SPIRIT LABS";
pub const STATUS_LABEL: &str = "SYSTEM STATUS";
pub const STATUS_VALUE: &str = "ONLINE_STABLE";

/// Tab list with the system status footer pinned to the bottom.
pub struct Sidebar {
    active: Tab,
}

impl Sidebar {
    pub fn new(active: Tab) -> Self {
        Self { active }
    }
}

impl Widget for Sidebar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [items_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(area);

        let items: Vec<ListItem> = Tab::ALL
            .iter()
            .map(|tab| {
                let active = *tab == self.active;
                let style = if active {
                    Style::default()
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors::NEUTRAL)
                };
                let marker = if active { "▌" } else { " " };
                ListItem::new(format!(
                    "{marker} {}  {}  [{}]",
                    tab.icon(),
                    tab.label(),
                    tab.index() + 1
                ))
                .style(style)
            })
            .collect();

        List::new(items).render(items_area, buf);

        let pulse = if (animation_clock() / 500) % 2 == 0 {
            colors::PRIMARY
        } else {
            colors::SECONDARY
        };
        let status = Paragraph::new(vec![
            Line::from(Span::styled(
                format!(" {STATUS_LABEL}"),
                Style::default().fg(colors::MUTED),
            )),
            Line::from(vec![
                Span::styled(" ● ", Style::default().fg(pulse)),
                Span::styled(
                    STATUS_VALUE,
                    Style::default()
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ]);
        status.render(status_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn lists_every_tab_and_status() {
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        Sidebar::new(Tab::Music).render(area, &mut buf);

        let rows = rows(&buf);
        for (row, tab) in rows.iter().zip(Tab::ALL) {
            assert!(row.contains(tab.label()), "{row:?}");
        }
        assert!(rows[1].starts_with('▌'));
        assert!(rows.iter().any(|r| r.contains(STATUS_LABEL)));
        assert!(rows.iter().any(|r| r.contains(STATUS_VALUE)));
    }
}
