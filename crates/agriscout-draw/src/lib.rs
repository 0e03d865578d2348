//! AgriScout Draw - Drawing session state machine
//!
//! This crate implements the land and partition drawing workflow,
//! orchestrating the field store, area estimation and containment checks.

pub mod location;
pub mod models;
pub mod session;

pub use location::{LocationSelection, LookupTicket, SelectedLocation};
pub use models::{
    ClickOutcome, DrawError, DrawState, EditingTarget, FinishOutcome, Preview, PreviewStyle,
    PartitionTarget, RejectReason, SessionSnapshot, ShapeKind,
};
pub use session::DrawingSession;
