//! Card and summary line builders for the dashboard screen.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use rumah_core::catalog::{DeviceSpec, RoomSpec};
use rumah_core::{HouseMode, PanelSnapshot};

use crate::theme;

/// One line per room card. Returns `None` when the snapshot has no entry
/// for this catalog id — the card is simply skipped, never an error.
pub fn room_card_line(
    spec: &RoomSpec,
    snapshot: &PanelSnapshot,
    selected: bool,
) -> Option<Line<'static>> {
    let state = snapshot.room(spec.id)?;

    let light_span = if state.light {
        Span::styled("💡 ON ", theme::on_style())
    } else {
        Span::styled("○ OFF", theme::off_style())
    };
    let occupancy = if state.occupied { "👤" } else { "  " };

    let name_style = if selected {
        theme::selected()
    } else {
        theme::body()
    };
    let marker = if selected { "▸ " } else { "  " };

    Some(Line::from(vec![
        Span::styled(marker.to_owned(), name_style),
        Span::styled(format!("{} {:<12}", spec.icon, spec.name), name_style),
        light_span,
        Span::raw(" "),
        Span::styled(occupancy.to_owned(), theme::body()),
    ]))
}

/// One line per device card. Same skip rule as [`room_card_line`].
pub fn device_card_line(
    spec: &DeviceSpec,
    snapshot: &PanelSnapshot,
    selected: bool,
) -> Option<Line<'static>> {
    let state = snapshot.device(spec.id)?;

    let status_span = if state.active {
        Span::styled("● AKTIF", theme::on_style())
    } else {
        Span::styled("○ mati ", theme::off_style())
    };

    let name_style = if selected {
        theme::selected()
    } else {
        theme::body()
    };
    let marker = if selected { "▸ " } else { "  " };

    Some(Line::from(vec![
        Span::styled(marker.to_owned(), name_style),
        Span::styled(format!("{} {:<12}", spec.icon, spec.name), name_style),
        status_span,
        Span::styled(format!("  {}", spec.power_label), theme::dim()),
    ]))
}

/// Summary strip: mode, lights on, devices active, watt figures.
pub fn summary_line(snapshot: &PanelSnapshot) -> Line<'static> {
    let mode_style = match snapshot.mode {
        HouseMode::Occupied => Style::default().fg(theme::SUCCESS_GREEN),
        HouseMode::Empty => theme::dim(),
    };

    Line::from(vec![
        Span::styled(format!(" {} ", snapshot.mode.label()), mode_style),
        Span::styled("│ ", theme::key_hint()),
        Span::styled(format!("💡 {} ", snapshot.lights_on()), theme::body()),
        Span::styled("│ ", theme::key_hint()),
        Span::styled(format!("⚙ {} ", snapshot.devices_active()), theme::body()),
        Span::styled("│ ", theme::key_hint()),
        Span::styled(
            format!(
                "{:.0} W now · {:.0} W peak · {:.0} W avg",
                snapshot.energy.current_watts,
                snapshot.energy.peak_watts,
                snapshot.energy.avg_watts
            ),
            theme::dim(),
        ),
    ])
}

/// Gauge label for the energy bar, e.g. "300 W / 4000 W (8%)".
pub fn energy_label(snapshot: &PanelSnapshot) -> String {
    let ratio = snapshot.energy.load_ratio();
    format!(
        "{:.0} W / {:.0} W ({:.0}%)",
        snapshot.energy.current_watts,
        rumah_core::EnergySnapshot::PANEL_CAPACITY_WATTS,
        ratio * 100.0
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rumah_core::catalog;
    use rumah_core::{DeviceState, RoomState};

    fn snapshot_with(room_light: bool, device_active: bool) -> PanelSnapshot {
        let mut snap = PanelSnapshot::default();
        snap.rooms.insert(
            "kamar1".into(),
            RoomState {
                light: room_light,
                occupied: false,
            },
        );
        snap.devices
            .insert("kompor".into(), DeviceState { active: device_active });
        snap
    }

    #[test]
    fn room_indicator_matches_snapshot_flag() {
        let spec = catalog::room("kamar1").expect("kamar1 in catalog");

        let on = room_card_line(spec, &snapshot_with(true, false), false).expect("card");
        assert!(on.spans.iter().any(|s| s.content.contains("ON")));

        let off = room_card_line(spec, &snapshot_with(false, false), false).expect("card");
        assert!(off.spans.iter().any(|s| s.content.contains("OFF")));
    }

    #[test]
    fn device_indicator_matches_snapshot_flag() {
        let spec = catalog::device("kompor").expect("kompor in catalog");

        let active = device_card_line(spec, &snapshot_with(false, true), false).expect("card");
        assert!(active.spans.iter().any(|s| s.content.contains("AKTIF")));

        let idle = device_card_line(spec, &snapshot_with(false, false), false).expect("card");
        assert!(idle.spans.iter().any(|s| s.content.contains("mati")));
    }

    #[test]
    fn missing_catalog_entry_yields_no_card() {
        let spec = catalog::room("dapur").expect("dapur in catalog");
        // snapshot only carries kamar1
        assert!(room_card_line(spec, &snapshot_with(true, false), false).is_none());
    }

    #[test]
    fn rendering_is_deterministic() {
        let snap = snapshot_with(true, true);
        let spec = catalog::room("kamar1").expect("kamar1 in catalog");

        let first = room_card_line(spec, &snap, true);
        let second = room_card_line(spec, &snap, true);
        assert_eq!(first, second);
        assert_eq!(summary_line(&snap), summary_line(&snap));
    }

    #[test]
    fn energy_label_shows_capacity_percentage() {
        let mut snap = PanelSnapshot::default();
        snap.energy.current_watts = 1000.0;
        assert_eq!(energy_label(&snap), "1000 W / 4000 W (25%)");
    }
}
