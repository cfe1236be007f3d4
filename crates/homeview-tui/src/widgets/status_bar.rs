use homeview_core::carousel::RotationScheduler;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

/// Rotation state as shown to the user
pub fn rotation_label(scheduler: &RotationScheduler) -> &'static str {
    if !scheduler.auto_rotate_enabled() {
        "OFF"
    } else if scheduler.is_paused() {
        "PAUSED"
    } else {
        "AUTO"
    }
}

fn rotation_color(label: &str, theme: &Theme) -> Color {
    match label {
        "AUTO" => theme.green,
        "PAUSED" => theme.yellow,
        _ => theme.red,
    }
}

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, scheduler: &RotationScheduler, theme: &Theme) {
        let label = rotation_label(scheduler);
        let position = match scheduler.current_panel() {
            Some(panel) => format!(
                " {}/{} {} ",
                scheduler.current_index() + 1,
                scheduler.panel_count(),
                panel.id
            ),
            None => " no panels ".to_string(),
        };
        let status_text = format!(" {} ", label);

        let help_hint = " q:quit j/k:panels h/l:news p:rotation r:refresh ";
        let used = status_text.width() + position.width() + help_hint.width();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.bg0).bg(rotation_color(label, theme)),
            ),
            Span::styled(position, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
