//! Draft editing sessions and their lifecycle.

use crate::draft::{ItemDraft, LocationDraft};
use crate::repo::RepoError;
use crate::service::ShoppingList;
use log::{debug, info};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable key of one editing session.
pub type SessionId = Uuid;

/// The buffer being edited in a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    Item(ItemDraft),
    Location(LocationDraft),
}

impl Draft {
    pub fn can_be_saved(&self) -> bool {
        match self {
            Self::Item(draft) => draft.can_be_saved(),
            Self::Location(draft) => draft.can_be_saved(),
        }
    }
}

/// Lifecycle of one editing session.
///
/// `New → Editing → {Committed | Cancelled | UnderlyingEntityDeleted}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    New,
    Editing,
    Committed,
    Cancelled,
    UnderlyingEntityDeleted,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Committed | Self::Cancelled | Self::UnderlyingEntityDeleted
        )
    }
}

/// Result of resuming a session after the editing screen comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// The draft is intact and may keep being edited.
    Active,
    /// The edited entity was deleted elsewhere; the UI must leave the editor.
    Abandoned,
}

/// Errors from draft session operations.
#[derive(Debug)]
pub enum SessionError {
    SessionNotFound(SessionId),
    /// The session already reached a terminal state.
    SessionClosed {
        session_id: SessionId,
        state: SessionState,
    },
    /// The edited entity no longer exists; the session was closed.
    EntityVanished(SessionId),
    /// The session holds the other draft kind.
    KindMismatch(SessionId),
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SessionNotFound(id) => write!(f, "draft session not found: {id}"),
            Self::SessionClosed { session_id, state } => {
                write!(f, "draft session {session_id} is closed ({state:?})")
            }
            Self::EntityVanished(id) => {
                write!(f, "entity edited by draft session {id} no longer exists")
            }
            Self::KindMismatch(id) => write!(f, "draft session {id} holds a different draft kind"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

#[derive(Debug)]
struct DraftSession {
    /// Dropped once the session reaches a terminal state.
    draft: Option<Draft>,
    state: SessionState,
}

/// Table of live editing sessions, owned by the UI controller.
///
/// Drafts live here, not in screen objects, so they survive the editing
/// screen being suspended and resumed. Closed sessions keep their terminal
/// state until `dispose`.
#[derive(Debug, Default)]
pub struct DraftSessions {
    sessions: HashMap<SessionId, DraftSession>,
}

impl DraftSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session for `draft` in state `New`.
    pub fn begin(&mut self, draft: Draft) -> SessionId {
        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            DraftSession {
                draft: Some(draft),
                state: SessionState::New,
            },
        );
        debug!("event=draft_session_begin module=draft status=ok session_id={id}");
        id
    }

    pub fn state(&self, id: SessionId) -> Option<SessionState> {
        self.sessions.get(&id).map(|session| session.state)
    }

    /// Read access to an open session's draft.
    pub fn draft(&self, id: SessionId) -> Option<&Draft> {
        self.sessions.get(&id)?.draft.as_ref()
    }

    /// Mutable access to an open session's draft; moves `New` to `Editing`.
    pub fn draft_mut(&mut self, id: SessionId) -> Result<&mut Draft, SessionError> {
        let session = self.open_session_mut(id)?;
        session.state = SessionState::Editing;
        session
            .draft
            .as_mut()
            .ok_or(SessionError::SessionNotFound(id))
    }

    pub fn item_draft_mut(&mut self, id: SessionId) -> Result<&mut ItemDraft, SessionError> {
        match self.draft_mut(id)? {
            Draft::Item(draft) => Ok(draft),
            Draft::Location(_) => Err(SessionError::KindMismatch(id)),
        }
    }

    pub fn location_draft_mut(
        &mut self,
        id: SessionId,
    ) -> Result<&mut LocationDraft, SessionError> {
        match self.draft_mut(id)? {
            Draft::Location(draft) => Ok(draft),
            Draft::Item(_) => Err(SessionError::KindMismatch(id)),
        }
    }

    /// Checks that the edited entity still exists when the editor reappears.
    ///
    /// A vanished entity closes the session as `UnderlyingEntityDeleted`.
    pub fn resume(
        &mut self,
        id: SessionId,
        list: &ShoppingList,
    ) -> Result<ResumeOutcome, SessionError> {
        let still_exists = {
            let session = self.open_session_mut(id)?;
            match session.draft.as_ref() {
                Some(draft) => draft_still_exists(draft, list)?,
                None => return Err(SessionError::SessionNotFound(id)),
            }
        };
        if still_exists {
            return Ok(ResumeOutcome::Active);
        }
        self.close(id, SessionState::UnderlyingEntityDeleted);
        Ok(ResumeOutcome::Abandoned)
    }

    /// Commits the session's draft and closes it as `Committed`.
    ///
    /// Returns the id of the created or updated entity.
    pub fn commit(
        &mut self,
        id: SessionId,
        list: &mut ShoppingList,
    ) -> Result<Uuid, SessionError> {
        let draft = {
            let session = self.open_session_mut(id)?;
            session
                .draft
                .clone()
                .ok_or(SessionError::SessionNotFound(id))?
        };
        if !draft_still_exists(&draft, list)? {
            self.close(id, SessionState::UnderlyingEntityDeleted);
            return Err(SessionError::EntityVanished(id));
        }

        let entity_id = match &draft {
            Draft::Item(draft) => list.commit_item_draft(draft)?,
            Draft::Location(draft) => list.commit_location_draft(draft)?,
        };
        self.close(id, SessionState::Committed);
        Ok(entity_id)
    }

    /// Discards the draft and closes the session as `Cancelled`.
    pub fn cancel(&mut self, id: SessionId) -> Result<(), SessionError> {
        self.open_session_mut(id)?;
        self.close(id, SessionState::Cancelled);
        Ok(())
    }

    /// Forgets a session entirely. Returns `false` for unknown ids.
    pub fn dispose(&mut self, id: SessionId) -> bool {
        self.sessions.remove(&id).is_some()
    }

    /// Number of sessions that are not closed.
    pub fn len(&self) -> usize {
        self.sessions
            .values()
            .filter(|session| !session.state.is_terminal())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn open_session_mut(&mut self, id: SessionId) -> Result<&mut DraftSession, SessionError> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(SessionError::SessionNotFound(id))?;
        if session.state.is_terminal() {
            return Err(SessionError::SessionClosed {
                session_id: id,
                state: session.state,
            });
        }
        Ok(session)
    }

    fn close(&mut self, id: SessionId, state: SessionState) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.draft = None;
            session.state = state;
            info!("event=draft_session_close module=draft status=ok session_id={id} state={state:?}");
        }
    }
}

fn draft_still_exists(draft: &Draft, list: &ShoppingList) -> Result<bool, RepoError> {
    match draft {
        Draft::Item(draft) => list.item_draft_still_exists(draft),
        Draft::Location(draft) => list.location_draft_still_exists(draft),
    }
}
