// Test doubles shared by the unit tests
use crate::application::canvas::{Canvas, Paint};
use crate::application::point_log::{PointLog, Subscription, SubscriptionId};
use crate::application::resources::Bitmap;
use crate::domain::colour::Colour;
use crate::domain::projection::PixelPoint;
use crate::domain::trackpoint::Coordinate;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Line {
        from: PixelPoint,
        to: PixelPoint,
        colour: Colour,
    },
    Bitmap {
        name: String,
        top_left: PixelPoint,
    },
    Text {
        text: String,
        anchor: PixelPoint,
    },
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<DrawOp>,
}

impl Canvas for RecordingCanvas {
    fn draw_line(&mut self, from: PixelPoint, to: PixelPoint, paint: &Paint) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            colour: paint.colour,
        });
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, top_left: PixelPoint) {
        self.ops.push(DrawOp::Bitmap {
            name: bitmap.name.clone(),
            top_left,
        });
    }

    fn draw_text(&mut self, text: &str, anchor: PixelPoint, _paint: &Paint) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            anchor,
        });
    }
}

/// Point log whose content, availability and call counts are driven by the
/// test.
#[derive(Default)]
pub struct ScriptedPointLog {
    points: Mutex<Vec<Coordinate>>,
    unavailable: AtomicBool,
    senders: Mutex<HashMap<SubscriptionId, watch::Sender<usize>>>,
    next_id: AtomicU64,
    snapshot_calls: AtomicUsize,
    unsubscribe_calls: AtomicUsize,
}

impl ScriptedPointLog {
    pub fn with_points(points: &[(f64, f64)]) -> Self {
        let log = Self::default();
        log.extend(points);
        log
    }

    pub fn push(&self, longitude: f64, latitude: f64) {
        self.extend(&[(longitude, latitude)]);
    }

    /// Appends all points, then notifies once.
    pub fn extend(&self, points: &[(f64, f64)]) {
        self.points
            .lock()
            .unwrap()
            .extend(points.iter().map(|&(lon, lat)| Coordinate::new(lon, lat)));
        self.notify();
    }

    pub fn notify(&self) {
        let len = self.points.lock().unwrap().len();
        for sender in self.senders.lock().unwrap().values() {
            sender.send_replace(len);
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn snapshot_calls(&self) -> usize {
        self.snapshot_calls.load(Ordering::SeqCst)
    }

    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribe_calls.load(Ordering::SeqCst)
    }

    pub fn subscriber_count(&self) -> usize {
        self.senders.lock().unwrap().len()
    }
}

impl PointLog for ScriptedPointLog {
    fn snapshot(&self) -> anyhow::Result<Vec<Coordinate>> {
        self.snapshot_calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            anyhow::bail!("scripted point log outage");
        }
        Ok(self.points.lock().unwrap().clone())
    }

    fn subscribe(&self) -> Subscription {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (tx, rx) = watch::channel(self.points.lock().unwrap().len());
        self.senders.lock().unwrap().insert(id, tx);
        Subscription::new(id, rx)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.unsubscribe_calls.fetch_add(1, Ordering::SeqCst);
        self.senders.lock().unwrap().remove(&id);
    }
}
