//! Route lifecycle events
//!
//! The planner reports what it did through an injected `EventSink` instead
//! of any process-wide broadcast. Sinks must not block: they are called
//! from inside route generation.

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use crate::types::RouteKey;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RouteEvent {
    #[serde(rename_all = "camelCase")]
    RouteGenerated { key: RouteKey, stop_count: usize },
    #[serde(rename_all = "camelCase")]
    RouteServedFromCache { key: RouteKey },
    #[serde(rename_all = "camelCase")]
    RouteInvalidated { key: RouteKey },
    #[serde(rename_all = "camelCase")]
    BuildingSkipped { key: RouteKey, building_id: String },
    #[serde(rename_all = "camelCase")]
    ConflictsDetected { route_id: Uuid, count: usize },
}

pub trait EventSink: Send + Sync {
    fn publish(&self, event: RouteEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn publish(&self, _event: RouteEvent) {}
}

/// Forwards events into an unbounded tokio channel
#[derive(Debug, Clone)]
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<RouteEvent>,
}

impl ChannelEventSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<RouteEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelEventSink {
    fn publish(&self, event: RouteEvent) {
        if self.tx.send(event).is_err() {
            debug!("Route event receiver dropped, event discarded");
        }
    }
}
