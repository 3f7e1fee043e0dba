//! Simulated threads.
//!
//! A thread is an identity plus a fixed program of actions. The only mutable
//! part is the replay cursor, which is rewound at the start of every run.

use crate::action::{parse_action, Action, ThreadId};

/// A logical actor whose actions are replayed serially.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thread {
    id: ThreadId,
    actions: Vec<Action>,
    /// Index of the next action to replay.
    cursor: usize,
}

impl Thread {
    pub fn new(id: impl Into<ThreadId>, actions: Vec<Action>) -> Self {
        Self {
            id: id.into(),
            actions,
            cursor: 0,
        }
    }

    /// Build a thread from raw action tokens (`"LOCK R1"`, `"UNLOCK R1"`, ...).
    pub fn from_tokens<I, S>(id: impl Into<ThreadId>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let actions = tokens
            .into_iter()
            .map(|token| parse_action(token.as_ref()))
            .collect();
        Self::new(id, actions)
    }

    pub fn id(&self) -> &ThreadId {
        &self.id
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.actions.len()
    }

    /// Rewind the cursor to the first action.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Return the next action and advance the cursor.
    pub fn next_action(&mut self) -> Option<&Action> {
        let action = self.actions.get(self.cursor)?;
        self.cursor += 1;
        Some(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::ResourceId;

    #[test]
    fn test_new_thread() {
        let t = Thread::from_tokens("T1", ["LOCK R1", "work", "UNLOCK R1"]);
        assert_eq!(t.id().as_str(), "T1");
        assert_eq!(t.actions().len(), 3);
        assert!(!t.is_finished());
    }

    #[test]
    fn test_next_action_walks_program_in_order() {
        let mut t = Thread::from_tokens("T1", ["LOCK R1", "UNLOCK R1"]);
        assert_eq!(t.next_action(), Some(&Action::Lock(ResourceId::from("R1"))));
        assert_eq!(t.next_action(), Some(&Action::Unlock(ResourceId::from("R1"))));
        assert_eq!(t.next_action(), None);
        assert!(t.is_finished());
    }

    #[test]
    fn test_reset_rewinds_cursor() {
        let mut t = Thread::from_tokens("T1", ["a", "b"]);
        t.next_action();
        t.next_action();
        assert!(t.is_finished());
        t.reset();
        assert!(!t.is_finished());
        assert_eq!(t.next_action(), Some(&Action::Generic("a".to_string())));
    }

    #[test]
    fn test_empty_thread_is_finished() {
        let t = Thread::new("idle", Vec::new());
        assert!(t.is_finished());
    }
}
