//! Session identity for ledger operations.
//!
//! The engine never reads ambient session state. Every operation that acts
//! on someone's records takes a [SessionProvider] and asks it who is signed
//! in, so tests and embedders can substitute their own notion of identity.

/// Supplies the owner that ledger operations act on.
pub trait SessionProvider {
    /// The owner of the current session, or `None` when nobody is signed in.
    fn current_owner(&self) -> Option<String>;
}

/// A session for contexts that always act as a single owner, such as the
/// command line tools.
#[derive(Debug, Clone)]
pub struct SingleUserSession {
    owner_id: String,
}

impl SingleUserSession {
    /// Create a session that is permanently signed in as `owner_id`.
    pub fn new(owner_id: &str) -> Self {
        Self {
            owner_id: owner_id.to_owned(),
        }
    }
}

impl SessionProvider for SingleUserSession {
    fn current_owner(&self) -> Option<String> {
        Some(self.owner_id.clone())
    }
}
