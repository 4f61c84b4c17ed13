// Point log port: ordered trackpoint snapshots and change subscriptions
use crate::domain::trackpoint::Coordinate;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Receipt for a point log subscription.
///
/// Changes coalesce: the channel only carries the latest committed length,
/// so a burst of appends wakes the holder once.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    changes: watch::Receiver<usize>,
}

impl Subscription {
    pub fn new(id: SubscriptionId, changes: watch::Receiver<usize>) -> Self {
        Self { id, changes }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Waits for the next committed change. Returns `false` once the log has
    /// released this subscription.
    pub async fn changed(&mut self) -> bool {
        self.changes.changed().await.is_ok()
    }

    /// Whether a change is waiting to be delivered.
    pub fn has_pending(&self) -> bool {
        self.changes.has_changed().unwrap_or(false)
    }

    /// Marks the latest change as delivered and returns the log length it
    /// announced.
    pub fn mark_seen(&mut self) -> usize {
        *self.changes.borrow_and_update()
    }
}

pub trait PointLog: Send + Sync {
    /// All committed points, ordered by ascending timestamp.
    fn snapshot(&self) -> anyhow::Result<Vec<Coordinate>>;

    fn subscribe(&self) -> Subscription;

    /// Releases a subscription. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}
