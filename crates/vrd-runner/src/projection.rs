//! Optimistic local projection over authoritative remote state.

/// A locally edited view of a value plus the last state the backend confirmed.
///
/// Edits go to the local view first; a successful write commits the backend's
/// answer as the new confirmed state, a failed one reverts to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection<T> {
    confirmed: T,
    local: T,
}

impl<T: Clone> Projection<T> {
    #[must_use]
    pub fn new(remote: T) -> Self {
        Self {
            local: remote.clone(),
            confirmed: remote,
        }
    }

    /// The value as currently shown, including unconfirmed edits.
    pub const fn local(&self) -> &T {
        &self.local
    }

    /// Apply an optimistic edit to the local view.
    pub fn apply<R>(&mut self, edit: impl FnOnce(&mut T) -> R) -> R {
        edit(&mut self.local)
    }

    /// Apply a backend-confirmed edit to both views.
    pub fn commit(&mut self, edit: impl Fn(&mut T)) {
        edit(&mut self.confirmed);
        edit(&mut self.local);
    }

    /// Promote the local view to confirmed.
    pub fn confirm(&mut self) {
        self.confirmed = self.local.clone();
    }

    /// Drop unconfirmed edits.
    pub fn revert(&mut self) {
        self.local = self.confirmed.clone();
    }

    /// Replace both views with a fresh remote snapshot.
    pub fn reset(&mut self, remote: T) {
        self.local = remote.clone();
        self.confirmed = remote;
    }
}

impl<T: PartialEq> Projection<T> {
    /// True while the local view differs from the confirmed state.
    pub fn is_pending(&self) -> bool {
        self.local != self.confirmed
    }
}
