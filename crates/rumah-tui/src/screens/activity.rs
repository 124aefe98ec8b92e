//! Activity screen — notification list and the activity log, newest-first.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use rumah_core::{Command, PanelSnapshot};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::feed;

pub struct ActivityScreen {
    focused: bool,
    snapshot: Arc<PanelSnapshot>,
}

impl ActivityScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            snapshot: Arc::new(PanelSnapshot::default()),
        }
    }
}

impl Component for ActivityScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('c') => Ok(Some(Action::Command(Command::ClearNotifications))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::SnapshotUpdated(snapshot) = action {
            self.snapshot = Arc::clone(snapshot);
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Percentage(40), // notifications
            Constraint::Min(1),         // activity log
            Constraint::Length(1),      // hints
        ])
        .split(area);

        self.render_notifications(frame, layout[0]);
        self.render_log(frame, layout[1]);

        let hints = Line::from(vec![
            Span::styled("  c ", theme::key_hint_key()),
            Span::styled("clear notifications", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Activity"
    }
}

impl ActivityScreen {
    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        let count = self.snapshot.notifications.len();
        let title = if count == 0 {
            " Notifikasi ".to_owned()
        } else {
            format!(" Notifikasi ({count}) ")
        };

        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = feed::notification_lines(&self.snapshot.notifications);
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Log Aktivitas ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Show only what fits, newest entries first.
        let mut lines = feed::log_lines(&self.snapshot.logs);
        lines.truncate(inner.height as usize);
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_requests_clearing_notifications() {
        let mut screen = ActivityScreen::new();
        let action = screen
            .handle_key_event(KeyEvent::from(KeyCode::Char('c')))
            .expect("key handling succeeds");
        assert!(matches!(
            action,
            Some(Action::Command(Command::ClearNotifications))
        ));
    }
}
