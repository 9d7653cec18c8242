/// Usernames that have sent at least one chat message this session.
///
/// Names are kept in the order they were first seen and never removed.
#[derive(Debug, Default, Clone)]
pub struct Chatters {
    users: Vec<String>,
}

impl Chatters {
    pub fn new() -> Self {
        Chatters { users: Vec::new() }
    }

    /// Adds `user` if it has not been seen yet. Returns `true` when the name was new.
    pub fn register(&mut self, user: &str) -> bool {
        if self.contains(user) {
            return false;
        }
        self.users.push(user.to_string());
        true
    }

    pub fn contains(&self, user: &str) -> bool {
        self.users.iter().any(|u| u == user)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(String::as_str)
    }
}
