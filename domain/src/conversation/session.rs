//! Per-login conversation session

use super::thread::ThreadId;
use super::turn::Turn;
use crate::core::error::DomainError;
use crate::identity::user::UserIdentity;

/// Conversation state of one logged-in user (Entity)
///
/// Created by [`Session::login`], cleared by [`Session::logout`]. A session is
/// owned by exactly one interaction and never shared between callers.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<UserIdentity>,
    thread_id: Option<ThreadId>,
    turns: Vec<Turn>,
}

impl Session {
    /// Start an authenticated session with no thread and no turns.
    pub fn login(user: UserIdentity) -> Self {
        Self {
            user: Some(user),
            thread_id: None,
            turns: Vec::new(),
        }
    }

    /// Clear every field; the session becomes unauthenticated.
    pub fn logout(&mut self) {
        *self = Self::default();
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    pub fn thread_id(&self) -> Option<&ThreadId> {
        self.thread_id.as_ref()
    }

    /// Mutable access to the thread slot, filled lazily on the first message.
    pub fn thread_slot(&mut self) -> &mut Option<ThreadId> {
        &mut self.thread_id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Append a turn, preserving insertion order.
    pub fn push_turn(&mut self, turn: Turn) -> Result<(), DomainError> {
        if !self.is_authenticated() {
            return Err(DomainError::NotAuthenticated);
        }
        self.turns.push(turn);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::email::Email;

    fn user() -> UserIdentity {
        UserIdentity::new("Giulia", Email::parse("giulia@nova.edu").unwrap())
    }

    #[test]
    fn test_default_session_is_unauthenticated() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(session.thread_id().is_none());
        assert!(session.turns().is_empty());
    }

    #[test]
    fn test_turns_keep_insertion_order() {
        let mut session = Session::login(user());
        session.push_turn(Turn::user("first")).unwrap();
        session.push_turn(Turn::assistant("second")).unwrap();
        session.push_turn(Turn::user("third")).unwrap();

        let texts: Vec<&str> = session.turns().iter().map(Turn::text).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_logout_clears_all_fields() {
        let mut session = Session::login(user());
        *session.thread_slot() = Some(ThreadId::new("thread_abc"));
        session.push_turn(Turn::user("hello")).unwrap();

        session.logout();

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.thread_id().is_none());
        assert!(session.turns().is_empty());
    }

    #[test]
    fn test_push_turn_requires_login() {
        let mut session = Session::default();
        let err = session.push_turn(Turn::user("hi")).unwrap_err();
        assert!(err.is_not_authenticated());
    }
}
