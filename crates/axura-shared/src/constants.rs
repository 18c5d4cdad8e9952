/// Statically configured admin login
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@axura.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Monthly price of one paid subscription
pub const SUBSCRIPTION_PRICE: f64 = 29.99;

/// Page sizes offered by the user table
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 50];

/// Page size used until the caller picks another one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default HTTP API port (server)
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Artificial latency of the mock endpoints, in milliseconds
pub const LIST_LATENCY_MS: u64 = 500;
pub const GET_LATENCY_MS: u64 = 300;
pub const UPDATE_LATENCY_MS: u64 = 500;

/// Client-side storage keys
pub const KEY_IS_AUTHENTICATED: &str = "isAuthenticated";
pub const KEY_USER_EMAIL: &str = "userEmail";
pub const KEY_AUTHENTICATED_AT: &str = "authenticatedAt";
pub const KEY_SETTINGS: &str = "settings";
