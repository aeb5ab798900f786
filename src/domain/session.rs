use super::ids::UserId;

/// Result of comparing a message sender against the local account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Mine,
    Theirs,
    /// The local account id is not known yet, so the message cannot be
    /// classified. Callers treat this as not-mine and log a warning.
    UnknownSelf,
}

/// Identity of the local account for the lifetime of the shell.
///
/// The id is seeded from configuration when present and confirmed (or
/// first learned) from the hub connect acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserSession {
    current_user_id: Option<UserId>,
    display_name: Option<String>,
}

impl UserSession {
    pub fn from_config(user_id: Option<i64>, display_name: Option<String>) -> Self {
        Self {
            current_user_id: user_id.map(UserId),
            display_name,
        }
    }

    pub fn current_user_id(&self) -> Option<UserId> {
        self.current_user_id
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Records the account id confirmed by the hub. The hub is
    /// authoritative over the configured value.
    pub fn confirm_user_id(&mut self, id: UserId) {
        self.current_user_id = Some(id);
    }

    pub fn classify(&self, sender: UserId) -> Ownership {
        match self.current_user_id {
            Some(me) if me == sender => Ownership::Mine,
            Some(_) => Ownership::Theirs,
            None => Ownership::UnknownSelf,
        }
    }
}
