// In-memory point log - append-only trackpoint store with change channels
use crate::application::point_log::{PointLog, Subscription, SubscriptionId};
use crate::domain::error::{Result, TrackError};
use crate::domain::trackpoint::{Coordinate, Trackpoint};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

#[derive(Debug, Default)]
pub struct InMemoryPointLog {
    points: RwLock<Vec<Trackpoint>>,
    subscribers: Mutex<HashMap<SubscriptionId, watch::Sender<usize>>>,
    next_id: AtomicU64,
}

impl InMemoryPointLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits a trackpoint and notifies every subscriber. Returns the new
    /// log length.
    pub fn append(&self, trackpoint: Trackpoint) -> Result<usize> {
        let len = {
            let mut points = self.write_points();

            if let Some(last) = points.last() {
                if trackpoint.timestamp < last.timestamp {
                    return Err(TrackError::OutOfOrder {
                        previous: last.timestamp,
                        timestamp: trackpoint.timestamp,
                    });
                }
            }

            points.push(trackpoint);
            points.len()
        };

        for sender in self.lock_subscribers().values() {
            sender.send_replace(len);
        }

        Ok(len)
    }

    pub fn len(&self) -> usize {
        self.read_points().len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock_subscribers().len()
    }

    // Writers never leave the point vector half-updated, so a poisoned lock
    // still guards consistent data.
    fn read_points(&self) -> RwLockReadGuard<'_, Vec<Trackpoint>> {
        self.points.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_points(&self) -> RwLockWriteGuard<'_, Vec<Trackpoint>> {
        self.points.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, HashMap<SubscriptionId, watch::Sender<usize>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PointLog for InMemoryPointLog {
    fn snapshot(&self) -> anyhow::Result<Vec<Coordinate>> {
        Ok(self.read_points().iter().map(Trackpoint::coordinate).collect())
    }

    fn subscribe(&self) -> Subscription {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        // Registered under the subscriber lock so an append cannot slip
        // between reading the length and inserting the sender.
        let mut subscribers = self.lock_subscribers();
        let (tx, rx) = watch::channel(self.len());
        subscribers.insert(id, tx);

        Subscription::new(id, rx)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if self.lock_subscribers().remove(&id).is_none() {
            tracing::debug!("Ignoring unknown {:?}", id);
        }
    }
}
