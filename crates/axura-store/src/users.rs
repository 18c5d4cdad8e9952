//! The authoritative in-memory user collection.
//!
//! Rows keep their insertion order; every view over them (filtering,
//! sorting, paging) is derived elsewhere and never mutates the collection.

use axura_shared::seed::seed_users;
use axura_shared::{SubscriptionStatus, UserId, UserPatch, UserRecord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserStore {
    users: Vec<UserRecord>,
}

impl UserStore {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    /// A store holding the twelve mock users.
    pub fn seeded() -> Self {
        Self::new(seed_users())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn all(&self) -> &[UserRecord] {
        &self.users
    }

    /// Swap in a freshly fetched collection.
    pub fn replace_all(&mut self, users: Vec<UserRecord>) {
        self.users = users;
    }

    pub fn find(&self, id: &UserId) -> Option<&UserRecord> {
        self.users.iter().find(|u| &u.id == id)
    }

    pub fn with_status(&self, status: SubscriptionStatus) -> Vec<UserRecord> {
        self.users
            .iter()
            .filter(|u| u.subscription_status == status)
            .cloned()
            .collect()
    }

    /// Merge `patch` into the row with `id`. The id itself never changes.
    /// Returns the updated row, or `None` (and changes nothing) if absent.
    pub fn update_by_id(&mut self, id: &UserId, patch: &UserPatch) -> Option<&UserRecord> {
        let user = self.users.iter_mut().find(|u| &u.id == id)?;
        patch.apply_to(user);
        tracing::debug!(id = %id, "updated user");
        Some(user)
    }

    /// Drop the row with `id`. Returns `false` if there was none.
    pub fn remove_by_id(&mut self, id: &UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|u| &u.id != id);
        let removed = self.users.len() != before;
        if removed {
            tracing::debug!(id = %id, "removed user");
        }
        removed
    }
}

impl From<Vec<UserRecord>> for UserStore {
    fn from(users: Vec<UserRecord>) -> Self {
        Self::new(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_store_filters_by_status() {
        let store = UserStore::seeded();
        assert_eq!(store.len(), 12);
        assert_eq!(store.with_status(SubscriptionStatus::Paid).len(), 6);
        assert_eq!(store.with_status(SubscriptionStatus::Unpaid).len(), 6);
    }

    #[test]
    fn test_update_merges_fields_and_keeps_id() {
        let mut store = UserStore::seeded();
        let id = UserId::from("3");
        let patch = UserPatch {
            email: Some("bob@example.org".into()),
            subscription_status: Some(SubscriptionStatus::Unpaid),
            ..Default::default()
        };

        let updated = store.update_by_id(&id, &patch).cloned().unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.name, "Bob Johnson");
        assert_eq!(updated.email, "bob@example.org");
        assert_eq!(updated.subscription_status, SubscriptionStatus::Unpaid);
        assert_eq!(store.find(&id), Some(&updated));
    }

    #[test]
    fn test_update_of_unknown_id_is_a_no_op() {
        let mut store = UserStore::seeded();
        let before = store.clone();
        let patch = UserPatch {
            name: Some("Nobody".into()),
            ..Default::default()
        };

        assert!(store.update_by_id(&UserId::from("404"), &patch).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn test_remove_drops_only_the_matching_row() {
        let mut store = UserStore::seeded();
        assert!(store.remove_by_id(&UserId::from("2")));
        assert_eq!(store.len(), 11);
        assert!(store.find(&UserId::from("2")).is_none());

        assert!(!store.remove_by_id(&UserId::from("2")));
        assert_eq!(store.len(), 11);
        assert_eq!(store.all()[0].id, UserId::from("1"));
        assert_eq!(store.all()[1].id, UserId::from("3"));
    }
}
