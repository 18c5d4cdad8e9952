//! Where the console gets its user list from.

use std::future::Future;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use axura_shared::stats::{AnalyticsReport, DashboardStats, Timeframe};
use axura_shared::{AxuraError, SubscriptionStatus, UserId, UserPatch, UserRecord};
use axura_store::UserStore;

/// Read and update access to the managed user dataset.
pub trait UserSource: Send + Sync {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<UserRecord>, AxuraError>> + Send;

    /// Users whose subscription is (or is not) paid.
    fn fetch_paid(
        &self,
        paid: bool,
    ) -> impl Future<Output = Result<Vec<UserRecord>, AxuraError>> + Send;

    fn fetch_one(&self, id: &UserId)
        -> impl Future<Output = Result<UserRecord, AxuraError>> + Send;

    /// Merge `patch` into the record with `id` and return the result. The id
    /// itself never changes.
    fn update(
        &self,
        id: &UserId,
        patch: &UserPatch,
    ) -> impl Future<Output = Result<UserRecord, AxuraError>> + Send;
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to the mock API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUserSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn stats(&self) -> Result<DashboardStats, AxuraError> {
        let resp = self.send(self.client.get(self.url("/stats"))).await?;
        decode(resp, None).await
    }

    pub async fn analytics(&self, timeframe: Timeframe) -> Result<AnalyticsReport, AxuraError> {
        let request = self
            .client
            .get(self.url("/analytics"))
            .query(&[("timeframe", timeframe.as_str())]);
        let resp = self.send(request).await?;
        decode(resp, None).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, AxuraError> {
        request
            .send()
            .await
            .map_err(|e| AxuraError::Network(format!("Cannot reach {}: {e}", self.base_url)))
    }
}

/// Turn a response into `T`, mapping a 404 on a user route to
/// [`AxuraError::UserNotFound`] and every other failure to
/// [`AxuraError::Network`].
async fn decode<T: DeserializeOwned>(
    resp: reqwest::Response,
    id: Option<&UserId>,
) -> Result<T, AxuraError> {
    let status = resp.status();

    if status.is_success() {
        return resp
            .json::<T>()
            .await
            .map_err(|e| AxuraError::Network(format!("Invalid response body: {e}")));
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(AxuraError::UserNotFound(id.clone()));
        }
    }

    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };
    Err(AxuraError::Network(format!("Server responded {status}: {message}")))
}

impl UserSource for HttpUserSource {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, AxuraError> {
        let resp = self.send(self.client.get(self.url("/users"))).await?;
        let users: Vec<UserRecord> = decode(resp, None).await?;
        debug!(count = users.len(), "Fetched users");
        Ok(users)
    }

    async fn fetch_paid(&self, paid: bool) -> Result<Vec<UserRecord>, AxuraError> {
        let request = self
            .client
            .get(self.url("/users"))
            .query(&[("paid", if paid { "true" } else { "false" })]);
        let resp = self.send(request).await?;
        let users: Vec<UserRecord> = decode(resp, None).await?;
        debug!(paid, count = users.len(), "Fetched users by subscription");
        Ok(users)
    }

    async fn fetch_one(&self, id: &UserId) -> Result<UserRecord, AxuraError> {
        let resp = self
            .send(self.client.get(self.url(&format!("/users/{id}"))))
            .await?;
        decode(resp, Some(id)).await
    }

    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<UserRecord, AxuraError> {
        let request = self.client.put(self.url(&format!("/users/{id}"))).json(patch);
        let resp = self.send(request).await?;
        decode(resp, Some(id)).await
    }
}

// ---------------------------------------------------------------------------
// In-process
// ---------------------------------------------------------------------------

/// Serves a dataset held in memory; used offline and in tests.
#[derive(Debug, Default)]
pub struct StaticUserSource {
    users: RwLock<UserStore>,
}

impl StaticUserSource {
    pub fn new(users: UserStore) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    pub fn seeded() -> Self {
        Self::new(UserStore::seeded())
    }
}

impl UserSource for StaticUserSource {
    async fn fetch_all(&self) -> Result<Vec<UserRecord>, AxuraError> {
        Ok(self.users.read().await.all().to_vec())
    }

    async fn fetch_paid(&self, paid: bool) -> Result<Vec<UserRecord>, AxuraError> {
        let status = SubscriptionStatus::from_paid(paid);
        Ok(self.users.read().await.with_status(status))
    }

    async fn fetch_one(&self, id: &UserId) -> Result<UserRecord, AxuraError> {
        self.users
            .read()
            .await
            .find(id)
            .cloned()
            .ok_or_else(|| AxuraError::UserNotFound(id.clone()))
    }

    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<UserRecord, AxuraError> {
        self.users
            .write()
            .await
            .update_by_id(id, patch)
            .cloned()
            .ok_or_else(|| AxuraError::UserNotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use tokio::net::TcpListener;

    use axura_server::{AppState, ServerConfig};

    use super::*;

    async fn spawn_mock_api() -> HttpUserSource {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = AppState::new(ServerConfig::default().without_latency(), UserStore::seeded());
        tokio::spawn(axura_server::serve_listener(listener, state));
        HttpUserSource::new(format!("http://{addr}/"))
    }

    fn unpaid() -> UserPatch {
        UserPatch {
            subscription_status: Some(SubscriptionStatus::Unpaid),
            ..UserPatch::default()
        }
    }

    #[tokio::test]
    async fn test_static_source_filters_and_updates() {
        let source = StaticUserSource::seeded();
        assert_eq!(source.fetch_all().await.unwrap().len(), 12);
        assert_eq!(source.fetch_paid(true).await.unwrap().len(), 6);

        let updated = source.update(&UserId::from("1"), &unpaid()).await.unwrap();
        assert_eq!(updated.id, UserId::from("1"));
        assert_eq!(updated.name, "John Doe");
        assert_eq!(source.fetch_paid(true).await.unwrap().len(), 5);
        assert_eq!(source.fetch_paid(false).await.unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_static_source_unknown_id() {
        let source = StaticUserSource::seeded();
        let err = source.fetch_one(&UserId::from("42")).await.unwrap_err();
        assert!(matches!(err, AxuraError::UserNotFound(id) if id.as_str() == "42"));
        let err = source.update(&UserId::from("42"), &unpaid()).await.unwrap_err();
        assert!(matches!(err, AxuraError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_http_source_against_mock_api() {
        let source = spawn_mock_api().await;
        assert!(!source.base_url().ends_with('/'));

        assert_eq!(source.fetch_all().await.unwrap().len(), 12);

        let paid = source.fetch_paid(true).await.unwrap();
        assert_eq!(paid.len(), 6);
        assert!(paid.iter().all(|u| u.subscription_status.is_paid()));

        let jane = source.fetch_one(&UserId::from("2")).await.unwrap();
        assert_eq!(jane.name, "Jane Smith");

        let updated = source.update(&UserId::from("3"), &unpaid()).await.unwrap();
        assert_eq!(updated.subscription_status, SubscriptionStatus::Unpaid);
        assert_eq!(source.fetch_paid(true).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_http_source_maps_404() {
        let source = spawn_mock_api().await;
        let err = source.fetch_one(&UserId::from("999")).await.unwrap_err();
        assert!(matches!(err, AxuraError::UserNotFound(id) if id.as_str() == "999"));

        let err = source.update(&UserId::from("999"), &unpaid()).await.unwrap_err();
        assert!(matches!(err, AxuraError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn test_http_source_stats_and_analytics() {
        let source = spawn_mock_api().await;
        let stats = source.stats().await.unwrap();
        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.paid_users, 6);

        let report = source.analytics(Timeframe::Quarter).await.unwrap();
        assert_eq!(report.timeframe, Timeframe::Quarter);
    }

    #[tokio::test]
    async fn test_http_source_unreachable() {
        // Bind then drop so the port is (very likely) closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpUserSource::new(format!("http://{addr}"));
        let err = source.fetch_all().await.unwrap_err();
        assert!(matches!(err, AxuraError::Network(_)));
    }
}
