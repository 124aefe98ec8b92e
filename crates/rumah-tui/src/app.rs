//! Application core — event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use rumah_core::{Panel, PanelSnapshot};

use crate::action::{Action, ConnectionStatus, Toast, ToastLevel};
use crate::component::Component;
use crate::data_bridge::spawn_data_bridge;
use crate::event::{Event, EventReader};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// How long a toast stays visible in the footer.
const TOAST_LIFETIME: Duration = Duration::from_secs(4);

/// Top-level application state and event loop.
pub struct App {
    panel: Panel,
    /// Current active screen.
    active_screen: ScreenId,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    /// Whether the app should keep running.
    running: bool,
    /// Connection status indicator for the header.
    connection_status: ConnectionStatus,
    /// Latest snapshot, for the header (mode + refresh time).
    snapshot: Arc<PanelSnapshot>,
    /// Footer toast with its creation time.
    toast: Option<(Toast, Instant)>,
    /// Terminal bell requested by a fresh notification.
    bell_pending: bool,
    /// Cancels the data bridge on shutdown.
    cancel: CancellationToken,
    /// Action sender — components can dispatch actions through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(panel: Panel) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens().into_iter().collect();

        Self {
            panel,
            active_screen: ScreenId::Dashboard,
            screens,
            running: true,
            connection_status: ConnectionStatus::default(),
            snapshot: Arc::new(PanelSnapshot::default()),
            toast: None,
            bell_pending: false,
            cancel: CancellationToken::new(),
            action_tx,
            action_rx,
        }
    }

    /// Initialize all screen components with the action sender.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.init_screens()?;

        // Background task: connect and stream panel data into the action loop
        tokio::spawn(spawn_data_bridge(
            self.panel.clone(),
            self.action_tx.clone(),
            self.cancel.clone(),
        ));

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }

            if self.bell_pending {
                self.bell_pending = false;
                tui.ring_bell();
            }
        }

        events.stop();
        self.cancel.cancel();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen component.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c'))
            | (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='2')) => {
                let n = c as u8 - b'0';
                if let Some(screen) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }

            _ => {}
        }

        // Delegate to the active screen component
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }

        Ok(None)
    }

    /// Process a single action — update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::Tick => {
                if let Some((_, shown)) = &self.toast {
                    if shown.elapsed() >= TOAST_LIFETIME {
                        self.toast = None;
                    }
                }
            }

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::ConnectionChanged(status) => {
                self.connection_status = *status;
            }

            Action::SnapshotUpdated(snapshot) => {
                self.snapshot = Arc::clone(snapshot);
                // Every screen mirrors the snapshot, not just the active one
                for screen in self.screens.values_mut() {
                    screen.update(action)?;
                }
            }

            Action::AlertFired(notification) => {
                self.bell_pending = true;
                self.toast = Some((Toast::warning(notification.message.clone()), Instant::now()));
            }

            Action::Command(cmd) => {
                // Run the command off the UI loop; surface rejections as toasts
                let panel = self.panel.clone();
                let tx = self.action_tx.clone();
                let cmd = cmd.clone();
                tokio::spawn(async move {
                    let describe = cmd.describe();
                    if let Err(e) = panel.execute(cmd).await {
                        warn!(command = %describe, error = %e, "command failed");
                        let _ = tx.send(Action::Notify(Toast::error(e.to_string())));
                    }
                });
            }

            Action::Notify(toast) => {
                self.toast = Some((toast.clone(), Instant::now()));
            }

            Action::DismissToast => {
                self.toast = None;
            }

            // Render is handled in the main loop, not here
            Action::Render | Action::Resize(..) => {}
        }

        Ok(())
    }

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Length(1), // header
            Constraint::Min(1),    // screen content
            Constraint::Length(1), // tab bar
            Constraint::Length(1), // footer
        ])
        .split(area);

        self.render_header(frame, layout[0]);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[1]);
        }

        self.render_tab_bar(frame, layout[2]);
        self.render_footer(frame, layout[3]);
    }

    /// Header: title, house mode, clock, connection dot.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let connection = match self.connection_status {
            ConnectionStatus::Connected => {
                Span::styled("●", Style::default().fg(theme::SUCCESS_GREEN))
            }
            ConnectionStatus::Degraded => {
                Span::styled("●", Style::default().fg(theme::WARNING_ORANGE))
            }
            ConnectionStatus::Connecting => {
                Span::styled("◐", Style::default().fg(theme::WARNING_ORANGE))
            }
            ConnectionStatus::Disconnected => {
                Span::styled("○", Style::default().fg(theme::ERROR_RED))
            }
        };

        let clock = Local::now().format("%H:%M:%S").to_string();
        let line = Line::from(vec![
            Span::styled(" 🏠 rumah ", theme::title_style()),
            Span::styled("│ ", theme::key_hint()),
            Span::styled(self.snapshot.mode.label(), theme::body()),
            Span::styled(" │ ", theme::key_hint()),
            Span::styled(clock, theme::dim()),
            Span::raw(" "),
            connection,
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the bottom tab bar showing both screens.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    /// Footer: active toast, or the global key hints.
    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some((ref toast, _)) = self.toast {
            let color = match toast.level {
                ToastLevel::Success => theme::SUCCESS_GREEN,
                ToastLevel::Info => theme::TEAL,
                ToastLevel::Warning => theme::WARNING_ORANGE,
                ToastLevel::Error => theme::ERROR_RED,
            };
            Line::from(Span::styled(
                format!(" {}", toast.message),
                Style::default().fg(color),
            ))
        } else {
            Line::from(vec![
                Span::styled(" 1/2 ", theme::key_hint_key()),
                Span::styled("screens  ", theme::key_hint()),
                Span::styled("q ", theme::key_hint_key()),
                Span::styled("quit", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}
