//! Line builders for the activity screen: notifications and the log feed.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use rumah_core::{LogEntry, Notification};

use crate::theme;

pub const NO_NOTIFICATIONS: &str = "Tidak ada notifikasi penting";
pub const NO_ACTIVITY: &str = "Belum ada aktivitas";

/// Notification list in fetch order, or the fixed placeholder when empty.
pub fn notification_lines(notifications: &[Notification]) -> Vec<Line<'static>> {
    if notifications.is_empty() {
        return vec![Line::from(Span::styled(
            format!("  {NO_NOTIFICATIONS}"),
            theme::dim(),
        ))];
    }

    notifications
        .iter()
        .map(|n| {
            let color = theme::category_color(n.category);
            let time = n.timestamp.clone().unwrap_or_default();
            let icon = n.icon.clone().unwrap_or_default();

            Line::from(vec![
                Span::styled(format!("  {time:<9}"), theme::dim()),
                Span::styled(format!("{icon} "), Style::default()),
                Span::styled(n.message.clone(), Style::default().fg(color)),
            ])
        })
        .collect()
}

/// Activity log rendered newest-first (the backend sends oldest-first),
/// or the fixed placeholder when empty.
pub fn log_lines(logs: &[LogEntry]) -> Vec<Line<'static>> {
    if logs.is_empty() {
        return vec![Line::from(Span::styled(
            format!("  {NO_ACTIVITY}"),
            theme::dim(),
        ))];
    }

    logs.iter()
        .rev()
        .map(|entry| {
            Line::from(vec![
                Span::styled(format!("  {:<9}", entry.timestamp), theme::dim()),
                Span::styled(format!("{:<20}", entry.action), theme::body()),
                Span::styled(entry.details.clone(), theme::dim()),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rumah_core::NotificationCategory;

    fn log(ts: &str, action: &str) -> LogEntry {
        LogEntry {
            timestamp: ts.into(),
            action: action.into(),
            details: String::new(),
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn empty_notifications_render_the_placeholder() {
        let lines = notification_lines(&[]);
        assert_eq!(lines.len(), 1);
        assert!(line_text(&lines[0]).contains("Tidak ada notifikasi penting"));
    }

    #[test]
    fn empty_logs_render_the_placeholder() {
        let lines = log_lines(&[]);
        assert_eq!(lines.len(), 1);
        assert!(line_text(&lines[0]).contains(NO_ACTIVITY));
    }

    #[test]
    fn logs_render_newest_first() {
        let logs = vec![
            log("10:00:01", "first"),
            log("10:00:02", "second"),
            log("10:00:03", "third"),
        ];

        let lines = log_lines(&logs);
        assert!(line_text(&lines[0]).contains("third"));
        assert!(line_text(&lines[1]).contains("second"));
        assert!(line_text(&lines[2]).contains("first"));
    }

    #[test]
    fn notifications_keep_fetch_order() {
        let notifs = vec![
            Notification {
                id: 1,
                timestamp: Some("10:00:00".into()),
                category: NotificationCategory::Warning,
                message: "Lampu dinyalakan".into(),
                icon: Some("💡".into()),
                sound: None,
            },
            Notification {
                id: 2,
                timestamp: Some("10:00:05".into()),
                category: NotificationCategory::Danger,
                message: "Kompor menyala".into(),
                icon: Some("🔥".into()),
                sound: None,
            },
        ];

        let lines = notification_lines(&notifs);
        assert!(line_text(&lines[0]).contains("Lampu dinyalakan"));
        assert!(line_text(&lines[1]).contains("Kompor menyala"));
    }
}
