//! Session audit hooks.
//!
//! Records capture a stage plus structured details so hosts can buffer or
//! visualise the edit history without reaching into the session.

use std::sync::Mutex;
use std::time::SystemTime;

use serde_json::Value;

/// Checkpoints emitted by `EditSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAuditStage {
    SessionCreated,
    ComponentAdded,
    /// A component or session command changed state.
    CommandApplied,
    /// Unknown target or locked component.
    CommandIgnored,
    DeviceSwitched,
    Projected,
}

#[derive(Debug, Clone)]
pub struct SessionAuditEvent {
    pub timestamp: SystemTime,
    pub stage: SessionAuditStage,
    pub details: Vec<(String, Value)>,
}

impl SessionAuditEvent {
    fn new(stage: SessionAuditStage) -> Self {
        Self {
            timestamp: SystemTime::now(),
            stage,
            details: Vec::new(),
        }
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

pub struct SessionAuditEventBuilder {
    event: SessionAuditEvent,
}

impl SessionAuditEventBuilder {
    pub fn new(stage: SessionAuditStage) -> Self {
        Self {
            event: SessionAuditEvent::new(stage),
        }
    }

    pub fn detail(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.event.details.push((key.into(), value));
        self
    }

    pub fn finish(self) -> SessionAuditEvent {
        self.event
    }
}

pub trait SessionAudit: Send + Sync {
    fn record(&self, event: SessionAuditEvent);
}

#[derive(Debug, Default)]
pub struct NullSessionAudit;

impl SessionAudit for NullSessionAudit {
    fn record(&self, _event: SessionAuditEvent) {}
}

/// Buffers every record in memory.
#[derive(Debug, Default)]
pub struct RecordingAudit {
    events: Mutex<Vec<SessionAuditEvent>>,
}

impl RecordingAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionAuditEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn stages(&self) -> Vec<SessionAuditStage> {
        self.events().into_iter().map(|event| event.stage).collect()
    }
}

impl SessionAudit for RecordingAudit {
    fn record(&self, event: SessionAuditEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_collects_details_in_order() {
        let mut builder = SessionAuditEventBuilder::new(SessionAuditStage::CommandApplied);
        builder
            .detail("command", json!("set_padding"))
            .detail("clamped", json!(true));
        let event = builder.finish();
        assert_eq!(event.stage, SessionAuditStage::CommandApplied);
        assert_eq!(event.details.len(), 2);
        assert_eq!(event.detail("clamped"), Some(&json!(true)));
    }

    #[test]
    fn recording_audit_keeps_everything() {
        let audit = RecordingAudit::new();
        audit.record(SessionAuditEventBuilder::new(SessionAuditStage::SessionCreated).finish());
        audit.record(SessionAuditEventBuilder::new(SessionAuditStage::Projected).finish());
        assert_eq!(
            audit.stages(),
            vec![SessionAuditStage::SessionCreated, SessionAuditStage::Projected]
        );
    }
}
