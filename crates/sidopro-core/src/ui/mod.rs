//! Interaction state that outlives a single view.
//!
//! Nothing here is global: each piece of state is an explicit object handed
//! to the code that needs it, so tests create a fresh one per case.
//!
//! - [`draft`]: draft storage keys and draft-guarded navigation
//! - [`transition`]: page-transition phases
//! - [`session`]: current role with change notifications

pub mod draft;
pub mod session;
pub mod transition;

pub use draft::{
    DraftGuard, DraftStorage, EventOutcome, FileDraftStorage, MemoryDraftStorage, NavigationHost,
    NavigationOutcome, UnsavedNavigation,
};
pub use session::SessionContext;
pub use transition::{TransitionContext, TransitionPhase};
