use crate::responses::user::User;

/// State carried from one step of a run to the next
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    /// Bearer token obtained by the login step
    pub token: Option<String>,
    /// Users returned by the most recent listing
    pub listing: Vec<User>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }

    /// Entry of the retained listing with the given id
    pub fn listed_user(&self, id: u64) -> Option<&User> {
        self.listing.iter().find(|user| user.id == id)
    }
}
