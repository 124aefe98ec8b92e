//! Dashboard screen — room cards, device cards, summary strip, energy gauge.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use rumah_core::catalog::{DeviceSpec, RoomSpec};
use rumah_core::{Command, PanelSnapshot, catalog};

use crate::action::{Action, Toast};
use crate::component::Component;
use crate::theme;
use crate::widgets::cards;

/// Which card column currently holds the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Pane {
    #[default]
    Rooms,
    Devices,
}

pub struct DashboardScreen {
    focused: bool,
    snapshot: Arc<PanelSnapshot>,
    pane: Pane,
    selected: usize,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            snapshot: Arc::new(PanelSnapshot::default()),
            pane: Pane::default(),
            selected: 0,
        }
    }

    /// Catalog rooms present in the current snapshot, in catalog order.
    fn visible_rooms(&self) -> Vec<&'static RoomSpec> {
        catalog::ROOMS
            .iter()
            .filter(|spec| self.snapshot.room(spec.id).is_some())
            .collect()
    }

    /// Catalog devices present in the current snapshot, in catalog order.
    fn visible_devices(&self) -> Vec<&'static DeviceSpec> {
        catalog::DEVICES
            .iter()
            .filter(|spec| self.snapshot.device(spec.id).is_some())
            .collect()
    }

    fn pane_len(&self) -> usize {
        match self.pane {
            Pane::Rooms => self.visible_rooms().len(),
            Pane::Devices => self.visible_devices().len(),
        }
    }

    fn selected_room(&self) -> Option<&'static RoomSpec> {
        self.visible_rooms().get(self.selected).copied()
    }

    fn selected_device(&self) -> Option<&'static DeviceSpec> {
        self.visible_devices().get(self.selected).copied()
    }

    fn select_next(&mut self) {
        let len = self.pane_len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected.min(len - 1) + 1) % len;
    }

    fn select_prev(&mut self) {
        let len = self.pane_len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected.min(len - 1) + len - 1) % len;
    }

    fn switch_pane(&mut self) {
        self.pane = match self.pane {
            Pane::Rooms => Pane::Devices,
            Pane::Devices => Pane::Rooms,
        };
        self.selected = 0;
    }

    /// Primary toggle for the selected card.
    fn toggle_selected(&self) -> Option<Action> {
        match self.pane {
            Pane::Rooms => self.selected_room().map(|spec| {
                Action::Command(Command::ToggleRoomLight {
                    room_id: spec.id.into(),
                })
            }),
            Pane::Devices => self.selected_device().map(|spec| {
                Action::Command(Command::ToggleDevice {
                    device_id: spec.id.into(),
                })
            }),
        }
    }

    /// Bulk commands are refused locally while the house is occupied,
    /// mirroring the backend's own rule.
    fn bulk_command(&self, command: Command) -> Action {
        if self.snapshot.mode.bulk_commands_allowed() {
            Action::Command(command)
        } else {
            Action::Notify(Toast::warning(
                "Matikan semua hanya saat rumah kosong".to_owned(),
            ))
        }
    }
}

impl Component for DashboardScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Tab | KeyCode::Left | KeyCode::Right | KeyCode::Char('h') => {
                self.switch_pane();
                None
            }
            KeyCode::Enter => self.toggle_selected(),
            KeyCode::Char('l') => {
                if self.pane == Pane::Rooms {
                    self.selected_room().map(|spec| {
                        Action::Command(Command::ToggleRoomLight {
                            room_id: spec.id.into(),
                        })
                    })
                } else {
                    None
                }
            }
            KeyCode::Char('o') => {
                if self.pane == Pane::Rooms {
                    self.selected_room().and_then(|spec| {
                        let state = self.snapshot.room(spec.id)?;
                        Some(Action::Command(Command::SetRoomOccupied {
                            room_id: spec.id.into(),
                            occupied: !state.occupied,
                        }))
                    })
                } else {
                    None
                }
            }
            KeyCode::Char('m') => Some(Action::Command(Command::SetHouseMode {
                mode: self.snapshot.mode.toggled(),
            })),
            KeyCode::Char('L') => Some(self.bulk_command(Command::TurnOffAllLights)),
            KeyCode::Char('D') => Some(self.bulk_command(Command::TurnOffAllDevices)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::SnapshotUpdated(snapshot) = action {
            self.snapshot = Arc::clone(snapshot);
            // Keep the selection in range after a shrink
            let len = self.pane_len();
            if len > 0 && self.selected >= len {
                self.selected = len - 1;
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(1), // summary strip
            Constraint::Length(3), // energy gauge
            Constraint::Min(1),    // cards
            Constraint::Length(1), // hints
        ])
        .split(area);

        frame.render_widget(Paragraph::new(cards::summary_line(&self.snapshot)), layout[0]);
        self.render_energy_gauge(frame, layout[1]);

        let columns =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(layout[2]);
        self.render_rooms(frame, columns[0]);
        self.render_devices(frame, columns[1]);

        self.render_hints(frame, layout[3]);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Dashboard"
    }
}

impl DashboardScreen {
    fn render_energy_gauge(&self, frame: &mut Frame, area: Rect) {
        let ratio = self.snapshot.energy.load_ratio();
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(" Energi ")
                    .title_style(theme::title_style())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border_default()),
            )
            .gauge_style(ratatui::style::Style::default().fg(theme::energy_color(ratio)))
            .ratio(ratio)
            .label(cards::energy_label(&self.snapshot));
        frame.render_widget(gauge, area);
    }

    fn render_rooms(&self, frame: &mut Frame, area: Rect) {
        let active = self.pane == Pane::Rooms;
        let block = Block::default()
            .title(" Ruangan ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused && active {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = self
            .visible_rooms()
            .iter()
            .enumerate()
            .filter_map(|(i, spec)| {
                cards::room_card_line(spec, &self.snapshot, active && i == self.selected)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_devices(&self, frame: &mut Frame, area: Rect) {
        let active = self.pane == Pane::Devices;
        let block = Block::default()
            .title(" Perangkat ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused && active {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = self
            .visible_devices()
            .iter()
            .enumerate()
            .filter_map(|(i, spec)| {
                cards::device_card_line(spec, &self.snapshot, active && i == self.selected)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let bulk_style = if self.snapshot.mode.bulk_commands_allowed() {
            theme::key_hint_key()
        } else {
            theme::key_hint() // rendered dim while occupied
        };
        let hints = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("select  ", theme::key_hint()),
            Span::styled("Tab ", theme::key_hint_key()),
            Span::styled("pane  ", theme::key_hint()),
            Span::styled("l/Enter ", theme::key_hint_key()),
            Span::styled("toggle  ", theme::key_hint()),
            Span::styled("o ", theme::key_hint_key()),
            Span::styled("occupancy  ", theme::key_hint()),
            Span::styled("m ", theme::key_hint_key()),
            Span::styled("mode  ", theme::key_hint()),
            Span::styled("L ", bulk_style),
            Span::styled("lights off  ", theme::key_hint()),
            Span::styled("D ", bulk_style),
            Span::styled("devices off", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }
}
