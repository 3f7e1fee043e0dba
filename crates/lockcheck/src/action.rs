//! Actions replayed by simulated threads.
//!
//! Every thread is a fixed sequence of [`Action`]s. Raw tokens such as
//! `"LOCK R1"` are classified once, at parse time, into the closed
//! `Lock`/`Unlock`/`Generic` variant so the runner can match exhaustively.

use std::fmt;

/// Names a lockable resource.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ResourceId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Names a simulated thread.
///
/// There is no `From` conversion to or from [`ResourceId`]; the two
/// identifier spaces only meet where code spells it out.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadId(String);

impl ThreadId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThreadId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ThreadId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

const LOCK_KEYWORD: &str = "LOCK";
const UNLOCK_KEYWORD: &str = "UNLOCK";

/// One step of a thread's program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Try to take the resource. Never blocks.
    Lock(ResourceId),
    /// Drop the resource, whoever holds it.
    Unlock(ResourceId),
    /// Anything else; only narrated.
    Generic(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Lock(r) => write!(f, "{LOCK_KEYWORD} {r}"),
            Action::Unlock(r) => write!(f, "{UNLOCK_KEYWORD} {r}"),
            Action::Generic(label) => f.write_str(label),
        }
    }
}

/// Classify a raw action token.
///
/// `LOCK <r>` and `UNLOCK <r>` become lock operations on the trimmed
/// remainder. A keyword with nothing after it, or any other string, is a
/// generic action labelled with the full token.
pub fn parse_action(token: &str) -> Action {
    if let Some(resource) = keyword_argument(token, LOCK_KEYWORD) {
        return Action::Lock(ResourceId::new(resource));
    }
    if let Some(resource) = keyword_argument(token, UNLOCK_KEYWORD) {
        return Action::Unlock(ResourceId::new(resource));
    }
    Action::Generic(token.to_string())
}

fn keyword_argument<'a>(token: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = token.strip_prefix(keyword)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let argument = rest.trim();
    (!argument.is_empty()).then_some(argument)
}
