//! Tracing integration.
//!
//! The crate logs through `tracing`. Install a subscriber in the application
//! to see the output:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_accordion::controller=debug")
//!     .init();
//! ```
//!
//! Stale callbacks and redundant state changes are logged at `trace`;
//! transition starts, completions and policy decisions at `debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Controller and transition lifecycle.
    pub const CONTROLLER: &str = "lattice_accordion::controller";
    /// Expansion state membership changes.
    pub const STATE: &str = "lattice_accordion::state";
    /// Signal emission.
    pub const SIGNAL: &str = "lattice_accordion::signal";
}
