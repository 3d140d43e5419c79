//! Per-session datasets, replacing process-wide "last upload" state.
//!
//! Each session owns its own normalized transactions, declared income and
//! chat history. The store is passed explicitly to every operation.

use std::collections::HashMap;

use spendwise_core::Transaction;

use crate::llm::ChatTurn;

pub type SessionId = String;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub transactions: Vec<Transaction>,
    pub monthly_income: f64,
    pub history: Vec<ChatTurn>,
}

impl Session {
    pub fn new(id: impl Into<SessionId>, transactions: Vec<Transaction>, monthly_income: f64) -> Self {
        Self {
            id: id.into(),
            transactions,
            monthly_income,
            history: Vec::new(),
        }
    }

    /// The last `max_turns` turns, oldest first. The window always opens
    /// on a user turn, so an odd limit drops the leading assistant reply.
    pub fn recent_history(&self, max_turns: usize) -> &[ChatTurn] {
        let start = self.history.len().saturating_sub(max_turns);
        let window = &self.history[start..];
        match window.first() {
            Some(turn) if turn.role != "user" => &window[1..],
            _ => window,
        }
    }

    pub fn record_exchange(&mut self, question: &str, answer: &str) {
        self.history.push(ChatTurn::user(question));
        self.history.push(ChatTurn::assistant(answer));
    }
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a session's dataset. A replaced session starts
    /// with an empty history.
    pub fn put(&mut self, session: Session) {
        self.sessions.insert(session.id.clone(), session);
    }

    pub fn get(&self, id: &str) -> Option<&Session> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Session> {
        self.sessions.remove(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_are_isolated() {
        let mut store = SessionStore::new();
        store.put(Session::new("a", Vec::new(), 1000.0));
        store.put(Session::new("b", Vec::new(), 2000.0));

        store.get_mut("a").unwrap().record_exchange("q", "r");
        assert_eq!(store.get("a").unwrap().history.len(), 2);
        assert!(store.get("b").unwrap().history.is_empty());
        assert_eq!(store.get("b").unwrap().monthly_income, 2000.0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_put_replaces_and_resets_history() {
        let mut store = SessionStore::new();
        store.put(Session::new("a", Vec::new(), 1000.0));
        store.get_mut("a").unwrap().record_exchange("q", "r");

        store.put(Session::new("a", Vec::new(), 500.0));
        let s = store.get("a").unwrap();
        assert_eq!(s.monthly_income, 500.0);
        assert!(s.history.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_recent_history_window() {
        let mut s = Session::new("a", Vec::new(), 1.0);
        for i in 0..3 {
            s.record_exchange(&format!("q{i}"), &format!("r{i}"));
        }
        let recent = s.recent_history(4);
        assert_eq!(recent.len(), 4);
        assert_eq!(recent[0].content, "q1");
        assert_eq!(recent[3].content, "r2");
        assert_eq!(s.recent_history(100).len(), 6);
        assert!(s.recent_history(0).is_empty());
    }

    #[test]
    fn test_odd_window_starts_on_user_turn() {
        let mut s = Session::new("a", Vec::new(), 1.0);
        for i in 0..3 {
            s.record_exchange(&format!("q{i}"), &format!("r{i}"));
        }
        let recent = s.recent_history(3);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].role, "user");
        assert_eq!(recent[0].content, "q2");
        assert_eq!(s.recent_history(1).len(), 0);
    }

    #[test]
    fn test_remove() {
        let mut store = SessionStore::new();
        store.put(Session::new("a", Vec::new(), 1.0));
        assert!(store.remove("a").is_some());
        assert!(store.is_empty());
    }
}
