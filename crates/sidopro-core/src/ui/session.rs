//! Signed-in role shared with interested listeners.

use tokio::sync::watch;

use crate::models::Role;

/// Holds the current role and notifies listeners when it changes.
pub struct SessionContext {
    sender: watch::Sender<Role>,
}

impl SessionContext {
    pub fn new(role: Role) -> Self {
        let (sender, _) = watch::channel(role);
        Self { sender }
    }

    pub fn role(&self) -> Role {
        *self.sender.borrow()
    }

    pub fn sign_in(&self, role: Role) {
        self.sender.send_if_modified(|current| {
            let changed = *current != role;
            *current = role;
            changed
        });
    }

    pub fn sign_out(&self) {
        self.sign_in(Role::Viewer);
    }

    /// Registers a listener; dropping the receiver unsubscribes it.
    pub fn listen(&self) -> watch::Receiver<Role> {
        self.sender.subscribe()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(Role::Viewer)
    }
}
