//! Detached edit buffers and the session table that owns them.
//!
//! # Responsibility
//! - Copy an entity's editable fields into a draft and back.
//! - Track each editing session's lifecycle explicitly, keyed by id.
//!
//! # Invariants
//! - A draft with `id == None` stands for an entity not created yet.
//! - A draft can be saved only when its name is not blank.
//! - A session whose entity vanished is never committed.

mod item_draft;
mod location_draft;
mod session;

pub use item_draft::ItemDraft;
pub use location_draft::LocationDraft;
pub use session::{Draft, DraftSessions, ResumeOutcome, SessionError, SessionId, SessionState};
