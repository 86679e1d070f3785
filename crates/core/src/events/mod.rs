//! Notifications emitted to the external event channel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::engine::RankedResultSet;

/// Default capacity of the broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Widget notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    /// The widget bound to its input element.
    Connected {
        selector: String,
        /// What the watcher reported about the element appearing.
        context: Value,
    },
    /// A query passed the trigger and was matched.
    QueryAnalyzed {
        input_value: String,
        query_value: String,
        results: RankedResultSet,
    },
}

impl WidgetEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            WidgetEvent::Connected { .. } => "connected",
            WidgetEvent::QueryAnalyzed { .. } => "query_analyzed",
        }
    }
}

/// Envelope wrapping a widget event with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub instance_id: Uuid,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: WidgetEvent,
}

/// Fire-and-forget broadcaster for widget events.
///
/// Cheaply cloneable. Emitting never blocks; with no subscriber the event is
/// dropped, and slow subscribers observe a lag instead of slowing the widget.
#[derive(Debug, Clone)]
pub struct EventBroadcaster {
    instance_id: Uuid,
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBroadcaster {
    pub fn new(instance_id: Uuid, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            instance_id,
            sender,
        }
    }

    pub fn instance_id(&self) -> Uuid {
        self.instance_id
    }

    pub fn emit(&self, event: WidgetEvent) {
        let envelope = EventEnvelope {
            instance_id: self.instance_id,
            timestamp: Utc::now(),
            event,
        };
        // Ignore send errors - they just mean no one is listening
        let _ = self.sender.send(envelope);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn connected(&self, selector: &str, context: Value) {
        self.emit(WidgetEvent::Connected {
            selector: selector.to_string(),
            context,
        });
    }

    pub fn query_analyzed(&self, input_value: &str, query_value: &str, results: &RankedResultSet) {
        self.emit(WidgetEvent::QueryAnalyzed {
            input_value: input_value.to_string(),
            query_value: query_value.to_string(),
            results: results.clone(),
        });
    }
}
