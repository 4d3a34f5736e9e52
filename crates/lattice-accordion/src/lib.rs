//! Accordion rows for Horizon Lattice list views.
//!
//! This crate adds expand/collapse behavior to a virtualized list whose row
//! views are pooled and recycled:
//!
//! - **Expansion State**: [`ExpansionState`] records which rows are expanded and
//!   is the only source of truth for it
//! - **Controller**: [`AccordionController`] toggles rows, runs the two-phase
//!   height/content animation, and re-syncs recycled views before display
//! - **Host Seams**: [`HostList`] and [`RowView`] are implemented by the list
//!   widget and its row views
//! - **Configuration**: [`AccordionConfig`] selects the reentrancy policy and
//!   animation timing, and can be loaded from TOML
//!
//! # Example
//!
//! ```
//! use lattice_accordion::{AccordionController, ExpansionState, RowId};
//!
//! let accordion = AccordionController::new();
//! assert!(!accordion.is_expanded(RowId::new(0, 2)));
//!
//! let mut saved = ExpansionState::new();
//! saved.add(RowId::new(0, 2));
//! assert_eq!(saved.iter().collect::<Vec<_>>(), vec![RowId::new(0, 2)]);
//! ```

mod config;
mod controller;
mod error;
pub mod logging;
mod row;
pub mod signal;
mod state;
pub mod thread_check;
pub mod transition;
mod view;

pub use config::{AccordionConfig, AnimationTiming, Easing, ReentrancyPolicy};
pub use controller::AccordionController;
pub use error::{ConfigError, Result};
pub use row::RowId;
pub use signal::{ConnectionId, Signal};
pub use state::ExpansionState;
pub use thread_check::ThreadAffinity;
pub use transition::{RowPhase, Transition, TransitionDirection, TransitionId, TransitionPhase};
pub use view::{HostList, RowView, ViewId};
