//! Region-based layout constraint engine for a virtual phone canvas.
//!
//! Components are placed into Top/Middle/Bottom bands of a selectable device
//! profile. The engine clamps every edit into its legal range and projects the
//! visible components to zoomed canvas geometry for an external renderer.
//!
//! ```
//! use canvas_mvp::{DeviceCatalog, EditSession};
//!
//! let mut session = EditSession::new(DeviceCatalog::builtin());
//! session.set_device_by_id("small_720p")?;
//! let id = session.add_component("Button");
//! session.set_size(id, Some(500.0), None);
//! assert_eq!(session.component(id).unwrap().width, 328.0);
//! # Ok::<(), canvas_mvp::CanvasError>(())
//! ```

pub mod component;
pub mod device;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod metrics;
pub mod projector;
pub mod region;
pub mod registry;
pub mod session;

pub use component::{Alignment, CanvasComponent, ComponentId};
pub use device::{DeviceCatalog, DeviceClass, DeviceProfile};
pub use engine::{Adjustment, Bounds, ComponentLimits, ConstraintEngine};
pub use error::{CanvasError, Result};
pub use geometry::{Dp, Point, Rect, Size};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{MetricSnapshot, SessionMetrics};
pub use projector::{CanvasProjection, CanvasProjector, ProjectedBand, ProjectedComponent};
pub use region::{Region, RegionBand, RegionPartitioner, RegionRatios};
pub use registry::GeometryRegistry;
pub use session::audit::{
    NullSessionAudit, RecordingAudit, SessionAudit, SessionAuditEvent, SessionAuditEventBuilder,
    SessionAuditStage,
};
pub use session::{
    CanvasSnapshot, Command, CommandOutcome, EditSession, EditorMode, IgnoreReason, SessionConfig,
};
