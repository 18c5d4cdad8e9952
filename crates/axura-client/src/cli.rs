use clap::{Parser, Subcommand};

use axura_shared::constants::DEFAULT_PAGE_SIZE;
use axura_shared::stats::Timeframe;
use axura_shared::SubscriptionStatus;

use crate::view::{FilterTab, SortField, SortOrder};

#[derive(Debug, Parser)]
#[command(name = "axura", version, about = "Axura admin console")]
pub struct Cli {
    /// Override the mock API base URL (otherwise AXURA_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in with the admin email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show who is signed in
    Whoami,
    /// List users as the admin table shows them
    Users(UsersArgs),
    /// Inspect or edit a single user
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Dashboard figures
    Stats,
    /// Analytics report for a timeframe
    Analytics {
        #[arg(long, default_value = "month")]
        timeframe: Timeframe,
    },
    /// Read or change console settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

impl Command {
    /// Everything except the session commands needs a signed-in admin.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Self::Login { .. } | Self::Logout | Self::Whoami)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct UsersArgs {
    /// all, paid or unpaid
    #[arg(long, default_value = "all")]
    pub tab: FilterTab,

    /// Case-insensitive match on name or email
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// name, email or status
    #[arg(long, default_value = "name")]
    pub sort: SortField,

    /// asc or desc
    #[arg(long, default_value = "asc")]
    pub order: SortOrder,

    /// Zero-based page index
    #[arg(long, default_value_t = 0)]
    pub page: usize,

    /// One of 5, 10, 25, 50
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Hide these ids from the listing (repeatable)
    #[arg(long = "remove", value_name = "ID")]
    pub remove: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum UserAction {
    Show {
        id: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// paid or unpaid
        #[arg(long)]
        status: Option<SubscriptionStatus>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    Show,
    /// e.g. `axura settings set darkMode false`
    Set { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_users_defaults() {
        let cli = Cli::try_parse_from(["axura", "users"]).unwrap();
        let Command::Users(args) = cli.command else {
            panic!("expected users command");
        };
        assert_eq!(args.tab, FilterTab::All);
        assert_eq!(args.sort, SortField::Name);
        assert_eq!(args.order, SortOrder::Asc);
        assert_eq!(args.page, 0);
        assert_eq!(args.page_size, 10);
        assert!(args.search.is_none());
    }

    #[test]
    fn test_users_flags() {
        let cli = Cli::try_parse_from([
            "axura", "users", "--tab", "paid", "-s", "jane", "--sort", "status", "--order",
            "desc", "--page", "2", "--page-size", "25", "--remove", "3", "--remove", "5",
        ])
        .unwrap();
        let Command::Users(args) = cli.command else {
            panic!("expected users command");
        };
        assert_eq!(args.tab, FilterTab::Paid);
        assert_eq!(args.search.as_deref(), Some("jane"));
        assert_eq!(args.sort, SortField::SubscriptionStatus);
        assert_eq!(args.order, SortOrder::Desc);
        assert_eq!(args.page, 2);
        assert_eq!(args.page_size, 25);
        assert_eq!(args.remove, vec!["3", "5"]);
    }

    #[test]
    fn test_rejects_unknown_tab() {
        assert!(Cli::try_parse_from(["axura", "users", "--tab", "trial"]).is_err());
    }

    #[test]
    fn test_user_update_parses_status() {
        let cli = Cli::try_parse_from(["axura", "user", "update", "3", "--status", "unpaid"])
            .unwrap();
        match cli.command {
            Command::User {
                action: UserAction::Update { id, status, name, .. },
            } => {
                assert_eq!(id, "3");
                assert_eq!(status, Some(SubscriptionStatus::Unpaid));
                assert!(name.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_analytics_timeframe() {
        let cli = Cli::try_parse_from(["axura", "analytics", "--timeframe", "week"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Analytics {
                timeframe: Timeframe::Week
            }
        ));
        assert!(Cli::try_parse_from(["axura", "analytics", "--timeframe", "decade"]).is_err());
    }

    #[test]
    fn test_global_api_url() {
        let cli =
            Cli::try_parse_from(["axura", "stats", "--api-url", "http://10.0.0.2:8080"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.2:8080"));
    }
}
