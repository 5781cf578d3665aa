//! Edit session: the single owner of editor state.
//!
//! Every inbound intent (add, select, edit, device switch, zoom, mode toggle)
//! is a method here, or a [`Command`] passed to [`EditSession::apply`]. The
//! session resolves the target, enforces the lock, delegates clamping to the
//! [`ConstraintEngine`] and reports a [`CommandOutcome`]. Nothing in this path
//! returns an error.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::{Value, json};

use crate::component::{Alignment, CanvasComponent, ComponentId, ComponentIdSequence};
use crate::device::{DeviceCatalog, DeviceProfile};
use crate::engine::{Adjustment, Bounds, ComponentLimits, ConstraintEngine};
use crate::error::Result;
use crate::geometry::{Dp, Point};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::SessionMetrics;
use crate::projector::{CanvasProjection, CanvasProjector};
use crate::region::{Region, RegionPartitioner, RegionRatios};

pub mod audit;
mod command;
mod snapshot;

pub use command::{Command, CommandOutcome, IgnoreReason};
pub use snapshot::CanvasSnapshot;

use audit::{NullSessionAudit, SessionAudit, SessionAuditEventBuilder, SessionAuditStage};

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 2.5;
pub const DEFAULT_ZOOM: f32 = 1.0;
const ZOOM_BOUNDS: Bounds = Bounds::new(MIN_ZOOM, MAX_ZOOM);

const LOG_TARGET: &str = "canvas::session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    #[default]
    Edit,
    Preview,
}

impl EditorMode {
    pub fn toggled(self) -> Self {
        match self {
            EditorMode::Edit => EditorMode::Preview,
            EditorMode::Preview => EditorMode::Edit,
        }
    }
}

/// Configuration knobs for an edit session.
#[derive(Clone)]
pub struct SessionConfig {
    /// Optional structured logger.
    pub logger: Option<Logger>,
    /// Counters shared with the host; `None` disables collection.
    pub metrics: Option<Arc<Mutex<SessionMetrics>>>,
    /// Target used by [`EditSession::emit_metrics`].
    pub metrics_target: String,
    /// Band height ratios used for every constraint and projection.
    pub ratios: RegionRatios,
    /// Re-clamp every component when the active device changes.
    pub revalidate_on_device_change: bool,
    pub audit: Arc<dyn SessionAudit>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            metrics_target: "canvas::session.metrics".to_string(),
            ratios: RegionRatios::EDITOR,
            revalidate_on_device_change: true,
            audit: Arc::new(NullSessionAudit),
        }
    }
}

impl SessionConfig {
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(SessionMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<SessionMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_ratios(mut self, ratios: RegionRatios) -> Self {
        self.ratios = ratios;
        self
    }

    pub fn with_audit(mut self, audit: Arc<dyn SessionAudit>) -> Self {
        self.audit = audit;
        self
    }
}

pub struct EditSession {
    catalog: DeviceCatalog,
    device: Arc<DeviceProfile>,
    components: Vec<CanvasComponent>,
    selected: Option<ComponentId>,
    zoom: f32,
    mode: EditorMode,
    ids: ComponentIdSequence,
    engine: ConstraintEngine,
    config: SessionConfig,
}

impl EditSession {
    pub fn new(catalog: DeviceCatalog) -> Self {
        Self::with_config(catalog, SessionConfig::default())
    }

    pub fn with_config(catalog: DeviceCatalog, config: SessionConfig) -> Self {
        let device = catalog.default_profile();
        let engine = ConstraintEngine::new(RegionPartitioner::new(config.ratios));
        let session = Self {
            catalog,
            device,
            components: Vec::new(),
            selected: None,
            zoom: DEFAULT_ZOOM,
            mode: EditorMode::Edit,
            ids: ComponentIdSequence::new(),
            engine,
            config,
        };
        session.log(
            LogLevel::Info,
            "session_created",
            [
                json_kv("device", session.device.id.as_str()),
                json_kv("devices", session.catalog.len()),
            ],
        );
        session.audit(
            SessionAuditStage::SessionCreated,
            [json_kv("device", session.device.id.as_str())],
        );
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &DeviceCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &ConstraintEngine {
        &self.engine
    }

    pub fn device(&self) -> &Arc<DeviceProfile> {
        &self.device
    }

    pub fn components(&self) -> &[CanvasComponent] {
        &self.components
    }

    pub fn component(&self, id: ComponentId) -> Option<&CanvasComponent> {
        self.components.iter().find(|component| component.id == id)
    }

    pub fn selected_id(&self) -> Option<ComponentId> {
        self.selected
    }

    /// `None` both when nothing is selected and when the selected id is unknown.
    pub fn selected_component(&self) -> Option<&CanvasComponent> {
        self.selected.and_then(|id| self.component(id))
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_preview(&self) -> bool {
        self.mode == EditorMode::Preview
    }

    pub fn limits(&self, id: ComponentId) -> Option<ComponentLimits> {
        self.component(id)
            .map(|component| self.engine.limits(component, &self.device))
    }

    /// Append a component with default geometry and select it.
    pub fn add_component(&mut self, name: impl Into<String>) -> ComponentId {
        let id = self.ids.next_id();
        let mut component = CanvasComponent::new(id, name);
        self.engine.revalidate(&mut component, &self.device);
        let name = component.name.clone();
        self.components.push(component);
        self.selected = Some(id);

        self.record("add_component", Some(id), CommandOutcome::Added(id));
        self.log(
            LogLevel::Debug,
            "component_added",
            [json_kv("id", id.get()), json_kv("name", name.as_str())],
        );
        self.audit(
            SessionAuditStage::ComponentAdded,
            [json_kv("id", id.get()), json_kv("name", name)],
        );
        id
    }

    /// Selecting an id that does not exist is legal.
    pub fn select_component(&mut self, id: Option<ComponentId>) -> CommandOutcome {
        let outcome = if self.selected == id {
            CommandOutcome::Unchanged
        } else {
            self.selected = id;
            CommandOutcome::Applied { clamped: false }
        };
        self.record("select_component", id, outcome);
        outcome
    }

    pub fn set_region(&mut self, id: ComponentId, region: Region) -> CommandOutcome {
        self.edit("set_region", id, true, |engine, _, component| {
            engine.set_region(component, region)
        })
    }

    pub fn set_size(
        &mut self,
        id: ComponentId,
        width: Option<Dp>,
        height: Option<Dp>,
    ) -> CommandOutcome {
        self.edit("set_size", id, true, |engine, device, component| {
            engine.set_size(component, device, width, height)
        })
    }

    pub fn set_opacity(&mut self, id: ComponentId, value: f32) -> CommandOutcome {
        self.edit("set_opacity", id, true, |engine, _, component| {
            engine.set_opacity(component, value)
        })
    }

    pub fn set_alignment(&mut self, id: ComponentId, alignment: Alignment) -> CommandOutcome {
        self.edit("set_alignment", id, true, |engine, _, component| {
            engine.set_alignment(component, alignment)
        })
    }

    pub fn set_padding(&mut self, id: ComponentId, padding: Dp) -> CommandOutcome {
        self.edit("set_padding", id, true, |engine, device, component| {
            engine.set_padding(component, device, padding)
        })
    }

    /// Visibility is a layer-panel toggle and stays available while locked.
    pub fn toggle_visible(&mut self, id: ComponentId) -> CommandOutcome {
        self.edit("toggle_visible", id, false, |engine, _, component| {
            engine.toggle_visible(component)
        })
    }

    pub fn toggle_lock(&mut self, id: ComponentId) -> CommandOutcome {
        self.edit("toggle_lock", id, false, |engine, _, component| {
            engine.toggle_lock(component)
        })
    }

    /// Switch the active device. Returns how many components were re-clamped;
    /// locked components are included since their bounds are device-relative.
    pub fn set_device(&mut self, device: Arc<DeviceProfile>) -> usize {
        let previous = std::mem::replace(&mut self.device, device);
        let mut revalidated = 0;
        if self.config.revalidate_on_device_change {
            for component in &mut self.components {
                if self.engine.revalidate(component, &self.device).changed {
                    revalidated += 1;
                }
            }
        }

        self.with_metrics(|metrics| metrics.record_device_switch(revalidated));
        self.record(
            "set_device",
            None,
            CommandOutcome::Applied {
                clamped: revalidated > 0,
            },
        );
        self.log(
            LogLevel::Info,
            "device_switched",
            [
                json_kv("from", previous.id.as_str()),
                json_kv("to", self.device.id.as_str()),
                json_kv("revalidated", revalidated),
            ],
        );
        self.audit(
            SessionAuditStage::DeviceSwitched,
            [
                json_kv("from", previous.id.as_str()),
                json_kv("to", self.device.id.as_str()),
                json_kv("revalidated", revalidated),
            ],
        );
        revalidated
    }

    pub fn set_device_by_id(&mut self, id: &str) -> Result<usize> {
        let device = self.catalog.require(id)?;
        Ok(self.set_device(device))
    }

    pub fn set_zoom(&mut self, value: f32) -> CommandOutcome {
        self.apply_zoom("set_zoom", value)
    }

    pub fn reset_zoom(&mut self) -> CommandOutcome {
        self.apply_zoom("reset_zoom", DEFAULT_ZOOM)
    }

    /// Modes only inform the chrome; commands stay available in both.
    pub fn toggle_preview_mode(&mut self) -> EditorMode {
        self.mode = self.mode.toggled();
        self.record(
            "toggle_preview_mode",
            None,
            CommandOutcome::Applied { clamped: false },
        );
        self.mode
    }

    pub fn apply(&mut self, command: Command) -> CommandOutcome {
        match command {
            Command::AddComponent { name } => CommandOutcome::Added(self.add_component(name)),
            Command::SelectComponent { id } => self.select_component(id),
            Command::SetRegion { id, region } => self.set_region(id, region),
            Command::SetSize { id, width, height } => self.set_size(id, width, height),
            Command::SetOpacity { id, value } => self.set_opacity(id, value),
            Command::SetAlignment { id, alignment } => self.set_alignment(id, alignment),
            Command::SetPadding { id, padding } => self.set_padding(id, padding),
            Command::ToggleVisible { id } => self.toggle_visible(id),
            Command::ToggleLock { id } => self.toggle_lock(id),
            Command::SetDevice { device_id } => match self.catalog.get(&device_id) {
                Some(device) => CommandOutcome::Applied {
                    clamped: self.set_device(device) > 0,
                },
                None => {
                    let outcome = CommandOutcome::Ignored(IgnoreReason::UnknownDevice);
                    self.record("set_device", None, outcome);
                    outcome
                }
            },
            Command::SetZoom { value } => self.set_zoom(value),
            Command::ResetZoom => self.reset_zoom(),
            Command::TogglePreviewMode => {
                self.toggle_preview_mode();
                CommandOutcome::Applied { clamped: false }
            }
        }
    }

    pub fn apply_json(&mut self, input: &str) -> Result<CommandOutcome> {
        let command = Command::from_json(input)?;
        Ok(self.apply(command))
    }

    /// Project the visible components onto the canvas. Reads state only.
    pub fn project(&self) -> CanvasProjection {
        let projection = CanvasProjector::new(&self.engine, &self.device, self.zoom)
            .project(&self.components, self.selected);
        self.with_metrics(|metrics| metrics.record_projection());
        self.audit(
            SessionAuditStage::Projected,
            [json_kv("components", projection.components.len())],
        );
        projection
    }

    pub fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            components: self.components.clone(),
            selected_id: self.selected,
            device: DeviceProfile::clone(&self.device),
            zoom: self.zoom,
            preview_mode: self.is_preview(),
            projection: self.project(),
        }
    }

    /// Select whatever sits under a canvas point; empty space clears the selection.
    pub fn select_at(&mut self, point: Point) -> CommandOutcome {
        let hit = self.project().hit_test(point);
        self.select_component(hit)
    }

    /// Log the current metrics snapshot, if both logger and metrics are configured.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(metrics)) =
            (self.config.logger.as_ref(), self.config.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let event = guard.snapshot().to_log_event(&self.config.metrics_target);
                let _ = logger.log_event(event);
            }
        }
    }

    fn edit<F>(
        &mut self,
        command: &'static str,
        id: ComponentId,
        respect_lock: bool,
        edit: F,
    ) -> CommandOutcome
    where
        F: FnOnce(&ConstraintEngine, &DeviceProfile, &mut CanvasComponent) -> Adjustment,
    {
        let outcome = match self.components.iter_mut().find(|c| c.id == id) {
            None => CommandOutcome::Ignored(IgnoreReason::UnknownComponent),
            Some(component) if respect_lock && component.locked => {
                CommandOutcome::Ignored(IgnoreReason::Locked)
            }
            Some(component) => {
                let adjustment = edit(&self.engine, self.device.as_ref(), component);
                if adjustment.changed {
                    CommandOutcome::Applied {
                        clamped: adjustment.clamped,
                    }
                } else {
                    CommandOutcome::Unchanged
                }
            }
        };
        self.record(command, Some(id), outcome);
        outcome
    }

    fn apply_zoom(&mut self, command: &'static str, value: f32) -> CommandOutcome {
        let outcome = match ZOOM_BOUNDS.clamp(value) {
            Some(zoom) if zoom != self.zoom => {
                self.zoom = zoom;
                CommandOutcome::Applied {
                    clamped: zoom != value,
                }
            }
            _ => CommandOutcome::Unchanged,
        };
        self.record(command, None, outcome);
        outcome
    }

    fn record(&self, command: &'static str, target: Option<ComponentId>, outcome: CommandOutcome) {
        self.with_metrics(|metrics| match outcome {
            CommandOutcome::Added(_) => metrics.record_component_added(),
            CommandOutcome::Applied { clamped } => metrics.record_applied(clamped),
            CommandOutcome::Unchanged => metrics.record_unchanged(),
            CommandOutcome::Ignored(IgnoreReason::Locked) => metrics.record_ignored_locked(),
            CommandOutcome::Ignored(_) => metrics.record_ignored_unknown(),
        });

        let mut fields = vec![json_kv("command", command)];
        if let Some(id) = target {
            fields.push(json_kv("id", id.get()));
        }
        match outcome {
            CommandOutcome::Ignored(reason) => {
                fields.push(json_kv("reason", json!(reason)));
                self.log(LogLevel::Debug, "command_ignored", fields.clone());
                self.audit(SessionAuditStage::CommandIgnored, fields);
            }
            CommandOutcome::Applied { clamped } => {
                fields.push(json_kv("clamped", clamped));
                self.log(LogLevel::Debug, "command_applied", fields.clone());
                self.audit(SessionAuditStage::CommandApplied, fields);
            }
            CommandOutcome::Unchanged => {
                self.log(LogLevel::Trace, "command_unchanged", fields);
            }
            CommandOutcome::Added(_) => {}
        }
    }

    fn with_metrics(&self, update: impl FnOnce(&mut SessionMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut guard);
            }
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn audit<I>(&self, stage: SessionAuditStage, details: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut builder = SessionAuditEventBuilder::new(stage);
        for (key, value) in details {
            builder.detail(key, value);
        }
        self.config.audit.record(builder.finish());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{
        MAX_OPACITY, MAX_PADDING, MIN_COMPONENT_HEIGHT, MIN_COMPONENT_WIDTH, MIN_OPACITY,
    };
    use crate::logging::MemorySink;
    use super::audit::RecordingAudit;

    fn catalog() -> DeviceCatalog {
        DeviceCatalog::from_profiles([
            DeviceProfile::new("narrow", "Narrow", 360, 800).unwrap(),
            DeviceProfile::new("tall", "Tall", 360, 891).unwrap(),
            DeviceProfile::new("tiny", "Tiny", 200, 300).unwrap(),
        ])
        .unwrap()
    }

    fn session() -> EditSession {
        EditSession::new(catalog())
    }

    #[test]
    fn builtin_default_device_limits_top_region() {
        let mut session = EditSession::new(DeviceCatalog::builtin());
        assert_eq!(session.device().height, 891);
        let id = session.add_component("header");
        session.set_region(id, Region::Top);
        assert_eq!(
            session.set_size(id, None, Some(300.0)),
            CommandOutcome::Applied { clamped: true }
        );
        assert_eq!(session.component(id).unwrap().height, 213.0);
        assert_eq!(session.limits(id).unwrap().height.max, 213.0);
    }

    #[test]
    fn add_then_pad_scenario() {
        let mut session = session();
        assert!(session.components().is_empty());

        let id = session.add_component("按钮");
        assert_eq!(id.get(), 1);
        assert_eq!(session.selected_id(), Some(id));
        let added = session.component(id).unwrap();
        assert_eq!((added.width, added.height), (240.0, 96.0));
        assert_eq!((added.opacity, added.padding), (1.0, 16.0));
        assert_eq!(added.region, Region::Middle);

        assert_eq!(session.set_padding(id, 60.0), CommandOutcome::Applied { clamped: false });
        let padded = session.component(id).unwrap();
        assert_eq!((padded.padding, padded.width), (60.0, 240.0));

        assert_eq!(session.set_padding(id, 140.0), CommandOutcome::Applied { clamped: true });
        let capped = session.component(id).unwrap();
        assert_eq!((capped.padding, capped.width), (64.0, 232.0));
    }

    #[test]
    fn width_limited_by_device_and_padding() {
        let mut session = session();
        let id = session.add_component("Card");
        session.set_size(id, Some(500.0), None);
        assert_eq!(session.component(id).unwrap().width, 328.0);
        assert_eq!(session.component(id).unwrap().height, 96.0);
    }

    #[test]
    fn height_limited_by_region_band() {
        let mut session = session();
        session.set_device_by_id("tall").unwrap();
        let id = session.add_component("Header");
        session.set_region(id, Region::Top);
        session.set_size(id, None, Some(300.0));
        assert_eq!(session.component(id).unwrap().height, 213.0);
        assert_eq!(session.limits(id).unwrap().height.max, 213.0);
    }

    #[test]
    fn edits_always_land_in_range() {
        let mut session = session();
        let id = session.add_component("Slider");
        let requests = [-500.0, -1.0, 0.0, 0.1, 63.0, 64.5, 95.0, 200.0, 340.0, 5000.0];
        for region in Region::ALL {
            session.set_region(id, region);
            for value in requests {
                session.set_padding(id, value);
                session.set_size(id, Some(value), Some(value));
                session.set_opacity(id, value);

                let component = session.component(id).unwrap();
                let limits = session.limits(id).unwrap();
                assert!(limits.admits(component), "{component:?} outside {limits:?}");
                assert!(component.width >= MIN_COMPONENT_WIDTH);
                assert!(component.height >= MIN_COMPONENT_HEIGHT);
                assert!((MIN_OPACITY..=MAX_OPACITY).contains(&component.opacity));
                assert!((0.0..=MAX_PADDING).contains(&component.padding));
            }
        }
    }

    #[test]
    fn repeated_padding_is_idempotent() {
        let mut session = session();
        let id = session.add_component("Text");
        session.set_size(id, Some(328.0), None);
        session.set_padding(id, 50.0);
        let once = session.component(id).unwrap().clone();
        assert_eq!(session.set_padding(id, 50.0), CommandOutcome::Unchanged);
        assert_eq!(session.component(id).unwrap(), &once);
    }

    #[test]
    fn locked_components_ignore_edits() {
        let mut session = session();
        let id = session.add_component("Logo");
        assert_eq!(session.toggle_lock(id), CommandOutcome::Applied { clamped: false });
        let before = session.component(id).unwrap().clone();

        let locked = CommandOutcome::Ignored(IgnoreReason::Locked);
        assert_eq!(session.set_region(id, Region::Bottom), locked);
        assert_eq!(session.set_size(id, Some(100.0), Some(70.0)), locked);
        assert_eq!(session.set_opacity(id, 0.4), locked);
        assert_eq!(session.set_alignment(id, Alignment::End), locked);
        assert_eq!(session.set_padding(id, 0.0), locked);
        assert_eq!(session.component(id).unwrap(), &before);

        assert!(session.toggle_visible(id).is_applied());
        assert!(!session.component(id).unwrap().visible);

        assert!(session.toggle_lock(id).is_applied());
        assert!(session.set_opacity(id, 0.4).is_applied());
        assert_eq!(session.component(id).unwrap().opacity, 0.4);
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut session = session();
        session.add_component("Only");
        let before = session.components().to_vec();
        let ghost = ComponentId::new(99);
        let unknown = CommandOutcome::Ignored(IgnoreReason::UnknownComponent);
        assert_eq!(session.set_padding(ghost, 10.0), unknown);
        assert_eq!(session.toggle_lock(ghost), unknown);
        assert_eq!(session.toggle_visible(ghost), unknown);
        assert_eq!(session.components(), before.as_slice());
    }

    #[test]
    fn ids_increase_and_newest_is_selected() {
        let mut session = session();
        let ids: Vec<_> = ["a", "b", "c"]
            .iter()
            .map(|name| session.add_component(*name).get())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(session.selected_id(), Some(ComponentId::new(3)));
        let order: Vec<_> = session.components().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn selecting_missing_id_yields_no_component() {
        let mut session = session();
        session.add_component("a");
        session.select_component(Some(ComponentId::new(42)));
        assert_eq!(session.selected_id(), Some(ComponentId::new(42)));
        assert!(session.selected_component().is_none());
        session.select_component(None);
        assert_eq!(session.selected_id(), None);
    }

    #[test]
    fn device_switch_revalidates_eagerly() {
        let mut session = session();
        let wide = session.add_component("wide");
        session.set_size(wide, Some(328.0), Some(400.0));
        let small = session.add_component("small");
        session.set_size(small, Some(100.0), Some(80.0));
        session.toggle_lock(wide);

        let adjusted = session.set_device_by_id("tiny").unwrap();
        assert_eq!(adjusted, 1);
        let wide = session.component(wide).unwrap();
        assert_eq!((wide.width, wide.height), (168.0, 156.0));
        let small = session.component(small).unwrap();
        assert_eq!((small.width, small.height), (100.0, 80.0));
        assert_eq!(session.device().id, "tiny");
    }

    #[test]
    fn device_switch_can_leave_components_stale() {
        let mut config = SessionConfig::default();
        config.revalidate_on_device_change = false;
        let mut session = EditSession::with_config(catalog(), config);
        let id = session.add_component("wide");
        session.set_size(id, Some(328.0), None);

        assert_eq!(session.set_device_by_id("tiny").unwrap(), 0);
        assert_eq!(session.component(id).unwrap().width, 328.0);
        // Projection still limits the stale width.
        assert_eq!(session.project().get(id).unwrap().rect.width, 168.0);
    }

    #[test]
    fn unknown_device_is_error_or_ignored() {
        let mut session = session();
        assert!(session.set_device_by_id("missing").is_err());
        let outcome = session.apply(Command::SetDevice {
            device_id: "missing".to_string(),
        });
        assert_eq!(outcome, CommandOutcome::Ignored(IgnoreReason::UnknownDevice));
        assert_eq!(session.device().id, "narrow");
    }

    #[test]
    fn zoom_is_clamped_and_resettable() {
        let mut session = session();
        assert_eq!(session.set_zoom(3.0), CommandOutcome::Applied { clamped: true });
        assert_eq!(session.zoom(), MAX_ZOOM);
        session.set_zoom(0.1);
        assert_eq!(session.zoom(), MIN_ZOOM);
        session.set_zoom(1.75);
        assert_eq!(session.zoom(), 1.75);
        assert_eq!(session.set_zoom(f32::NAN), CommandOutcome::Unchanged);
        assert_eq!(session.zoom(), 1.75);
        session.reset_zoom();
        assert_eq!(session.zoom(), DEFAULT_ZOOM);
    }

    #[test]
    fn preview_mode_does_not_gate_commands() {
        let mut session = session();
        assert_eq!(session.toggle_preview_mode(), EditorMode::Preview);
        assert!(session.is_preview());
        let id = session.add_component("still editable");
        assert!(session.set_opacity(id, 0.5).is_applied());
        assert_eq!(session.toggle_preview_mode(), EditorMode::Edit);
    }

    #[test]
    fn projection_is_pure() {
        let mut session = session();
        let a = session.add_component("a");
        session.add_component("b");
        session.set_alignment(a, Alignment::Start);
        session.set_zoom(1.5);

        let before = session.components().to_vec();
        let first = session.project();
        let second = session.project();
        assert_eq!(first, second);
        assert_eq!(session.components(), before.as_slice());
    }

    #[test]
    fn hidden_components_are_not_projected() {
        let mut session = session();
        let a = session.add_component("a");
        let b = session.add_component("b");
        session.toggle_visible(a);
        let projection = session.project();
        assert!(projection.get(a).is_none());
        assert!(projection.get(b).is_some());
        assert_eq!(session.snapshot().components.len(), 2);
    }

    #[test]
    fn click_selects_component_under_point() {
        let mut session = session();
        let a = session.add_component("a");
        session.add_component("b");
        // Middle band of the 360x800 device starts at y=192; `a` is centred.
        session.select_at(Point::new(180.0, 200.0));
        assert_eq!(session.selected_id(), Some(a));
        session.select_at(Point::new(2.0, 2.0));
        assert_eq!(session.selected_id(), None);
    }

    #[test]
    fn json_commands_drive_the_session() {
        let mut session = session();
        let added = session
            .apply_json(r#"{"command":"add_component","name":"按钮"}"#)
            .unwrap();
        assert_eq!(added, CommandOutcome::Added(ComponentId::new(1)));
        session
            .apply_json(r#"{"command":"set_size","id":1,"width":500}"#)
            .unwrap();
        session
            .apply_json(r#"{"command":"set_alignment","id":1,"alignment":"end"}"#)
            .unwrap();
        session.apply_json(r#"{"command":"toggle_preview_mode"}"#).unwrap();
        let component = session.component(ComponentId::new(1)).unwrap();
        assert_eq!(component.width, 328.0);
        assert_eq!(component.alignment, Alignment::End);
        assert!(session.is_preview());
        assert!(session.apply_json("not json").is_err());
    }

    #[test]
    fn snapshot_serializes_and_fingerprints() {
        let mut session = session();
        let id = session.add_component("a");
        let snapshot = session.snapshot();
        assert_eq!(snapshot.selected().map(|c| c.id), Some(id));
        assert!(!snapshot.preview_mode);

        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"selected_id\":1"));
        assert!(json.contains("\"preview_mode\":false"));
        assert!(!json.contains("\"mode\""));
        assert!(json.contains("\"region\":\"middle\""));

        let same = session.snapshot().fingerprint().unwrap();
        assert_eq!(snapshot.fingerprint().unwrap(), same);
        session.set_opacity(id, 0.3);
        assert_ne!(session.snapshot().fingerprint().unwrap(), same);
    }

    #[test]
    fn preview_ratio_set_changes_band_limits() {
        let config = SessionConfig::default().with_ratios(RegionRatios::PROPERTY_PREVIEW);
        let mut session = EditSession::with_config(catalog(), config);
        session.set_device_by_id("tall").unwrap();
        let id = session.add_component("a");
        session.set_region(id, Region::Top);
        session.set_size(id, None, Some(300.0));
        assert_eq!(session.component(id).unwrap().height, 249.0);
    }

    #[test]
    fn logging_metrics_and_audit_observe_commands() {
        let sink = MemorySink::new();
        let audit = Arc::new(RecordingAudit::new());
        let mut config = SessionConfig::default()
            .with_logger(Logger::new(sink.clone()))
            .with_audit(audit.clone());
        config.enable_metrics();
        let metrics = config.metrics_handle().unwrap();

        let mut session = EditSession::with_config(catalog(), config);
        let id = session.add_component("a");
        session.set_size(id, Some(900.0), None);
        session.toggle_lock(id);
        session.set_opacity(id, 0.5);
        session.set_padding(ComponentId::new(7), 3.0);
        session.set_device_by_id("tiny").unwrap();
        session.project();
        session.emit_metrics();

        let snapshot = metrics.lock().unwrap().snapshot();
        assert_eq!(snapshot.components_added, 1);
        assert_eq!(snapshot.applied, 3);
        assert_eq!(snapshot.clamped, 2);
        assert_eq!(snapshot.ignored_locked, 1);
        assert_eq!(snapshot.ignored_unknown, 1);
        assert_eq!(snapshot.device_switches, 1);
        assert_eq!(snapshot.revalidated_components, 1);
        assert_eq!(snapshot.projections, 1);

        let messages = sink.messages();
        assert_eq!(messages.first().map(String::as_str), Some("session_created"));
        assert!(messages.iter().any(|m| m == "component_added"));
        assert!(messages.iter().any(|m| m == "command_ignored"));
        assert!(messages.iter().any(|m| m == "device_switched"));
        assert_eq!(messages.last().map(String::as_str), Some("session_metrics"));

        let ignored = sink
            .events()
            .into_iter()
            .find(|event| event.message == "command_ignored")
            .unwrap();
        assert_eq!(ignored.field("reason"), Some(&json!("locked")));

        let stages = audit.stages();
        assert_eq!(stages.first(), Some(&SessionAuditStage::SessionCreated));
        assert!(stages.contains(&SessionAuditStage::DeviceSwitched));
        assert_eq!(stages.last(), Some(&SessionAuditStage::Projected));
    }
}
