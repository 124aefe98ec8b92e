// ── Room and device catalog ──
//
// The fixed, client-known identifier sets with display metadata.
// Backend entries whose id is not listed here are ignored; catalog
// entries absent from a snapshot are skipped by renderers. Ids and
// display names match the simulated house backend.

/// Display metadata for one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Display metadata for one controllable device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    /// Rated power draw, display only — never used in arithmetic.
    pub power_label: &'static str,
}

/// All rooms, in render order.
pub const ROOMS: [RoomSpec; 5] = [
    RoomSpec {
        id: "kamar1",
        name: "Kamar 1",
        icon: "🛏️",
    },
    RoomSpec {
        id: "kamar2",
        name: "Kamar 2",
        icon: "🛏️",
    },
    RoomSpec {
        id: "kamar3",
        name: "Kamar 3",
        icon: "🛏️",
    },
    RoomSpec {
        id: "dapur",
        name: "Dapur",
        icon: "🍳",
    },
    RoomSpec {
        id: "ruang_cuci",
        name: "Ruang Cuci",
        icon: "🧺",
    },
];

/// All devices, in render order.
pub const DEVICES: [DeviceSpec; 3] = [
    DeviceSpec {
        id: "mesin_cuci",
        name: "Mesin Cuci",
        icon: "🔄",
        power_label: "500W",
    },
    DeviceSpec {
        id: "pompa_air",
        name: "Pompa Air",
        icon: "💧",
        power_label: "200W",
    },
    DeviceSpec {
        id: "kompor",
        name: "Kompor",
        icon: "🔥",
        power_label: "300W",
    },
];

/// Look up a room by id.
pub fn room(id: &str) -> Option<&'static RoomSpec> {
    ROOMS.iter().find(|r| r.id == id)
}

/// Look up a device by id.
pub fn device(id: &str) -> Option<&'static DeviceSpec> {
    DEVICES.iter().find(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (i, a) in ROOMS.iter().enumerate() {
            assert!(!ROOMS.iter().skip(i + 1).any(|b| b.id == a.id));
        }
        for (i, a) in DEVICES.iter().enumerate() {
            assert!(!DEVICES.iter().skip(i + 1).any(|b| b.id == a.id));
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(room("dapur").map(|r| r.name), Some("Dapur"));
        assert_eq!(device("kompor").map(|d| d.power_label), Some("300W"));
        assert!(room("garasi").is_none());
        assert!(device("ac").is_none());
    }
}
