// ── Notification de-duplication ──
//
// The only guard against replaying the same alert cue every poll.

use std::collections::HashSet;

use crate::model::Notification;

/// Compares each poll's notification identifiers against the previous
/// poll's set. Anything not seen last time is "fresh" and may fire its
/// one-shot alert cue; everything else is a replay.
///
/// The very first applied poll only primes the set: notifications that
/// predate this client never replay their cues, no matter how long the
/// backend took to become reachable.
#[derive(Debug, Default)]
pub struct NotificationDeduper {
    previous: Option<HashSet<u64>>,
}

impl NotificationDeduper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the subset of `incoming` whose id was not present in the
    /// previous poll, preserving incoming order, then replace the
    /// previous-id set with the incoming one. The first call always
    /// returns nothing.
    pub fn fresh(&mut self, incoming: &[Notification]) -> Vec<Notification> {
        let fresh = match &self.previous {
            None => Vec::new(),
            Some(prev) => incoming
                .iter()
                .filter(|n| !prev.contains(&n.id))
                .cloned()
                .collect(),
        };
        self.previous = Some(incoming.iter().map(|n| n.id).collect());
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationCategory;
    use pretty_assertions::assert_eq;

    fn notif(id: u64) -> Notification {
        Notification {
            id,
            timestamp: None,
            category: NotificationCategory::Info,
            message: format!("notif {id}"),
            icon: None,
            sound: None,
        }
    }

    #[test]
    fn returns_only_unseen_ids_in_incoming_order() {
        let mut dedup = NotificationDeduper::new();
        dedup.fresh(&[notif(1), notif(2), notif(3)]);

        let fresh = dedup.fresh(&[notif(2), notif(3), notif(4), notif(5)]);
        let ids: Vec<u64> = fresh.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![4, 5]);
    }

    #[test]
    fn an_id_fires_at_most_once_across_polls() {
        let mut dedup = NotificationDeduper::new();
        dedup.fresh(&[]);

        let first = dedup.fresh(&[notif(1)]);
        assert_eq!(first.len(), 1);

        // Same id again on the next poll — no replay.
        let second = dedup.fresh(&[notif(1)]);
        assert!(second.is_empty());
    }

    #[test]
    fn id_dropped_then_reintroduced_fires_again() {
        // Previous-set semantics, not an all-time set: an id that
        // disappears and comes back counts as fresh again.
        let mut dedup = NotificationDeduper::new();
        dedup.fresh(&[notif(1)]);

        assert!(dedup.fresh(&[]).is_empty());
        let again = dedup.fresh(&[notif(1)]);
        assert_eq!(again.len(), 1);
    }

    #[test]
    fn first_poll_primes_without_firing() {
        let mut dedup = NotificationDeduper::new();
        assert!(dedup.fresh(&[notif(9)]).is_empty());
        assert!(dedup.fresh(&[notif(9)]).is_empty());
    }
}
