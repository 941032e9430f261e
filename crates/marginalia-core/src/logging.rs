//! Structured logging schema and field name constants for marginalia.
//!
//! All crates use these constants for consistent structured logging
//! fields, so log aggregation tools can query by standardized names
//! across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration (segments, per-annotation anchoring) |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "anchor", "db", "translate"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "locator", "materializer", "pool", "session"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "render", "locate", "apply_highlight", "translate"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Annotation id being operated on.
pub const ANNOTATION_ID: &str = "annotation_id";

/// Page locator the operation is scoped to.
pub const LOCATOR: &str = "locator";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of text segments in the current index.
pub const SEGMENT_COUNT: &str = "segment_count";

/// Number of annotations processed by a render pass.
pub const ANNOTATION_COUNT: &str = "annotation_count";

// ─── Database fields ───────────────────────────────────────────────────────

/// Number of active connections in the pool.
pub const POOL_SIZE: &str = "pool_size";

/// Number of idle connections in the pool.
pub const POOL_IDLE: &str = "pool_idle";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
