use chrono::Local;
use homeview_core::storage::Note;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{panel_block, PanelRenderer, RenderContext};

#[derive(Default)]
pub struct NotesPanel {
    notes: Vec<Note>,
}

impl NotesPanel {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

impl PanelRenderer for NotesPanel {
    fn title(&self) -> &str {
        "Notes"
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let theme = ctx.theme;
        let block = panel_block(self.title(), theme);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.notes.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                " No notes yet. Add one with `homeview note add <text>`",
                Style::default().fg(theme.grey1),
            )))
            .render(inner, buf);
            return;
        }

        // Newest first
        let lines: Vec<Line> = self
            .notes
            .iter()
            .rev()
            .map(|note| {
                let stamp = note.created_at.with_timezone(&Local).format("%m/%d %H:%M");
                Line::from(vec![
                    Span::styled(format!(" {} ", stamp), Style::default().fg(theme.grey1)),
                    Span::styled("▍", Style::default().fg(theme.yellow)),
                    Span::styled(note.text.clone(), Style::default().fg(theme.fg0)),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
