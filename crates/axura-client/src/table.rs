use tracing::{debug, info};

use axura_shared::{AxuraError, UserId, UserPatch, UserRecord};
use axura_store::UserStore;

use crate::source::UserSource;
use crate::view::{self, DerivedPage, ViewParameters};

/// The user collection as the console holds it, plus the table's view
/// parameters. Removals and edits only touch the local copy.
#[derive(Debug, Clone, Default)]
pub struct UserTable {
    users: UserStore,
    params: ViewParameters,
}

impl UserTable {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self {
            users: UserStore::new(users),
            params: ViewParameters::default(),
        }
    }

    /// Build a table from everything `source` currently holds.
    pub async fn load(source: &impl UserSource) -> Result<Self, AxuraError> {
        let users = source.fetch_all().await?;
        info!(count = users.len(), "Loaded user table");
        Ok(Self::new(users))
    }

    /// Replace the local rows with a fresh fetch, keeping the view parameters.
    pub async fn refresh(&mut self, source: &impl UserSource) -> Result<(), AxuraError> {
        let users = source.fetch_all().await?;
        self.replace_all(users);
        Ok(())
    }

    pub fn users(&self) -> &[UserRecord] {
        self.users.all()
    }

    pub fn params(&self) -> &ViewParameters {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut ViewParameters {
        &mut self.params
    }

    pub fn view(&self) -> DerivedPage {
        view::derive(self.users.all(), &self.params)
    }

    pub fn page_count(&self) -> usize {
        view::page_count(self.view().total_matching, self.params.page_size())
    }

    pub fn replace_all(&mut self, users: Vec<UserRecord>) {
        debug!(count = users.len(), "Replacing table rows");
        self.users.replace_all(users);
    }

    /// Drop the row with `id`. Returns whether one was removed.
    pub fn remove_by_id(&mut self, id: &UserId) -> bool {
        self.users.remove_by_id(id)
    }

    /// Merge `patch` into the row with `id`. Returns whether one matched.
    pub fn update_by_id(&mut self, id: &UserId, patch: &UserPatch) -> bool {
        self.users.update_by_id(id, patch).is_some()
    }
}
