//! Console command handlers.
//!
//! Each handler returns the text to print. [`dispatch`] routes a parsed
//! [`Command`] and refuses every command except `login`, `logout` and
//! `whoami` while no session is open.

pub mod analytics;
pub mod session;
pub mod settings;
pub mod users;

use axura_shared::UserPatch;
use axura_store::KeyValueStore;

use crate::cli::{Command, SettingsAction, UserAction};
use crate::error::{ClientError, Result};
use crate::session::{Clock, SessionGate};
use crate::state::AppState;

pub async fn dispatch(state: &AppState, command: Command) -> Result<String> {
    let gate = state.session();
    if command.requires_session() {
        require_session(&gate)?;
    }

    match command {
        Command::Login { email, password } => session::login(&gate, &email, &password),
        Command::Logout => session::logout(&gate),
        Command::Whoami => session::whoami(&gate),
        Command::Users(args) => users::list_users(&state.source, &args).await,
        Command::User { action } => match action {
            UserAction::Show { id } => users::show_user(&state.source, &id).await,
            UserAction::Update {
                id,
                name,
                email,
                status,
            } => {
                let patch = UserPatch {
                    name,
                    email,
                    subscription_status: status,
                };
                users::update_user(&state.source, &id, patch).await
            }
        },
        Command::Stats => analytics::stats(&state.source).await,
        Command::Analytics { timeframe } => analytics::analytics(&state.source, timeframe).await,
        Command::Settings { action } => match action {
            SettingsAction::Show => settings::show_settings(&state.database),
            SettingsAction::Set { key, value } => {
                settings::set_setting(&state.database, &key, &value)
            }
        },
    }
}

pub fn require_session<S: KeyValueStore, C: Clock>(gate: &SessionGate<S, C>) -> Result<()> {
    if gate.is_authenticated()? {
        Ok(())
    } else {
        Err(ClientError::Unauthenticated)
    }
}
