use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated by an edit session.
#[derive(Debug, Default, Clone)]
pub struct SessionMetrics {
    commands: u64,
    applied: u64,
    clamped: u64,
    unchanged: u64,
    ignored_locked: u64,
    ignored_unknown: u64,
    components_added: u64,
    device_switches: u64,
    revalidated_components: u64,
    projections: u64,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_applied(&mut self, clamped: bool) {
        self.commands = self.commands.saturating_add(1);
        self.applied = self.applied.saturating_add(1);
        if clamped {
            self.clamped = self.clamped.saturating_add(1);
        }
    }

    pub fn record_unchanged(&mut self) {
        self.commands = self.commands.saturating_add(1);
        self.unchanged = self.unchanged.saturating_add(1);
    }

    pub fn record_ignored_locked(&mut self) {
        self.commands = self.commands.saturating_add(1);
        self.ignored_locked = self.ignored_locked.saturating_add(1);
    }

    pub fn record_ignored_unknown(&mut self) {
        self.commands = self.commands.saturating_add(1);
        self.ignored_unknown = self.ignored_unknown.saturating_add(1);
    }

    pub fn record_component_added(&mut self) {
        self.commands = self.commands.saturating_add(1);
        self.components_added = self.components_added.saturating_add(1);
    }

    pub fn record_device_switch(&mut self, revalidated: usize) {
        self.device_switches = self.device_switches.saturating_add(1);
        self.revalidated_components = self
            .revalidated_components
            .saturating_add(revalidated as u64);
    }

    pub fn record_projection(&mut self) {
        self.projections = self.projections.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            commands: self.commands,
            applied: self.applied,
            clamped: self.clamped,
            unchanged: self.unchanged,
            ignored_locked: self.ignored_locked,
            ignored_unknown: self.ignored_unknown,
            components_added: self.components_added,
            device_switches: self.device_switches,
            revalidated_components: self.revalidated_components,
            projections: self.projections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub commands: u64,
    pub applied: u64,
    pub clamped: u64,
    pub unchanged: u64,
    pub ignored_locked: u64,
    pub ignored_unknown: u64,
    pub components_added: u64,
    pub device_switches: u64,
    pub revalidated_components: u64,
    pub projections: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "session_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("commands".to_string(), json!(self.commands));
        map.insert("applied".to_string(), json!(self.applied));
        map.insert("clamped".to_string(), json!(self.clamped));
        map.insert("unchanged".to_string(), json!(self.unchanged));
        map.insert("ignored_locked".to_string(), json!(self.ignored_locked));
        map.insert("ignored_unknown".to_string(), json!(self.ignored_unknown));
        map.insert("components_added".to_string(), json!(self.components_added));
        map.insert("device_switches".to_string(), json!(self.device_switches));
        map.insert(
            "revalidated_components".to_string(),
            json!(self.revalidated_components),
        );
        map.insert("projections".to_string(), json!(self.projections));
        map
    }
}
