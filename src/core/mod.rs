// src/core/mod.rs

// The `core` module holds everything a scan needs and nothing the terminal UI
// needs: the UI only consumes `ScanOutcome` values and stage notifications.

/// Data structures shared across the application, such as `ScanResult`,
/// `ScanOutcome` and the pipeline's `ScanStage`.
pub mod models;

/// Fatal scan errors and transport failures.
pub mod errors;

/// Provider endpoints and the user agent the scanners identify with.
pub mod endpoints;

/// Raw input to `NormalizedTarget`.
pub mod normalizer;

/// The HTTP seam every external lookup goes through.
pub mod transport;

/// The individual lookups and the orchestrator that chains them.
pub mod scanner;
