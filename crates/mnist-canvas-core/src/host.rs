//! The embedding host: readiness, component values and frame sizing.

use crate::output::OutputValue;
use serde::{Deserialize, Serialize};

/// Outbound operations of the dashboard host.
pub trait Host {
    /// Tell the host the component can receive render events. Sent once at startup.
    fn set_component_ready(&mut self);

    /// Report the component value.
    fn set_component_value(&mut self, value: &OutputValue);

    /// Resize the embedding frame.
    fn set_frame_height(&mut self, height: u32);
}

/// One outbound host call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    ComponentReady,
    ComponentValue { value: OutputValue },
    FrameHeight { height: u32 },
}

/// Host that records every call, for tests and headless replays.
#[derive(Debug, Default)]
pub struct RecordingHost {
    messages: Vec<HostMessage>,
}

impl RecordingHost {
    /// Create an empty recording host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, in order.
    pub fn messages(&self) -> &[HostMessage] {
        &self.messages
    }

    /// Take the recorded messages, leaving the log empty.
    pub fn drain(&mut self) -> Vec<HostMessage> {
        std::mem::take(&mut self.messages)
    }

    /// Component values sent so far.
    pub fn values(&self) -> impl Iterator<Item = &OutputValue> {
        self.messages.iter().filter_map(|m| match m {
            HostMessage::ComponentValue { value } => Some(value),
            _ => None,
        })
    }

    /// The most recent frame height.
    pub fn last_frame_height(&self) -> Option<u32> {
        self.messages.iter().rev().find_map(|m| match m {
            HostMessage::FrameHeight { height } => Some(*height),
            _ => None,
        })
    }
}

impl Host for RecordingHost {
    fn set_component_ready(&mut self) {
        self.messages.push(HostMessage::ComponentReady);
    }

    fn set_component_value(&mut self, value: &OutputValue) {
        self.messages.push(HostMessage::ComponentValue {
            value: value.clone(),
        });
    }

    fn set_frame_height(&mut self, height: u32) {
        self.messages.push(HostMessage::FrameHeight { height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_order() {
        let mut host = RecordingHost::new();
        host.set_component_ready();
        host.set_frame_height(382);
        host.set_component_value(&OutputValue::cleared());
        host.set_frame_height(342);

        assert_eq!(host.messages().len(), 4);
        assert_eq!(host.messages()[0], HostMessage::ComponentReady);
        assert_eq!(host.last_frame_height(), Some(342));
        assert_eq!(host.values().count(), 1);

        let drained = host.drain();
        assert_eq!(drained.len(), 4);
        assert!(host.messages().is_empty());
    }

    #[test]
    fn test_message_json() {
        let json = serde_json::to_string(&HostMessage::FrameHeight { height: 10 }).unwrap();
        assert_eq!(json, r#"{"type":"frame_height","height":10}"#);
    }
}
