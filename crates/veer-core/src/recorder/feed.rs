use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, warn};

use crate::error::{Result, VeeringError};
use crate::session::{HeadingSample, SessionRecord};

/// Update pushed by a sensor callback while a session is tracked
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    Heading(HeadingSample),
    /// Latest cumulative pedometer distance
    Distance(f64),
}

/// Producer half of the feed; clone it for each sensor callback.
#[derive(Debug, Clone)]
pub struct FeedSender {
    tx: Sender<SensorEvent>,
}

impl FeedSender {
    pub fn send(&self, event: SensorEvent) -> Result<()> {
        self.tx.send(event).map_err(|_| VeeringError::FeedClosed)
    }

    pub fn send_heading(&self, sample: HeadingSample) -> Result<()> {
        self.send(SensorEvent::Heading(sample))
    }

    pub fn send_distance(&self, distance: f64) -> Result<()> {
        self.send(SensorEvent::Distance(distance))
    }
}

/// Consumer half of the feed; consumed once to freeze the session.
#[derive(Debug)]
pub struct FeedCollector {
    rx: Receiver<SensorEvent>,
}

impl FeedCollector {
    /// Drains events until every sender is dropped, then validates and
    /// returns the frozen session.
    pub fn collect(self) -> Result<SessionRecord> {
        let mut headings = Vec::new();
        let mut walked_distance = 0.0;

        for event in self.rx.iter() {
            match event {
                SensorEvent::Heading(sample) => headings.push(sample),
                SensorEvent::Distance(distance) => {
                    if distance < walked_distance {
                        warn!(
                            "Pedometer distance went backwards ({:.2} -> {:.2})",
                            walked_distance, distance
                        );
                    }
                    walked_distance = distance;
                }
            }
        }

        debug!(target: "veer_core::recorder",
            "Feed closed after {} headings", headings.len()
        );
        SessionRecord::new(headings, walked_distance)
    }
}

/// Bounded channel between sensor callbacks and the session builder.
pub fn sensor_feed(capacity: usize) -> (FeedSender, FeedCollector) {
    let (tx, rx) = bounded(capacity);
    (FeedSender { tx }, FeedCollector { rx })
}
