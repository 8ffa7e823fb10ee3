use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::warn;

use shared_config::AppConfig;
use shared_database::ClinicStore;
use shared_models::auth::Session;
use shared_models::error::AppError;

/// Router state shared by every cell.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<ClinicStore>,
    pub started_at: DateTime<Utc>,
    commit_order: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: AppConfig, store: ClinicStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            started_at: Utc::now(),
            commit_order: Arc::new(Mutex::new(())),
        }
    }

    /// Runs a store mutation and appends its activity entry before any other
    /// mutation can start, so the feed lists changes in the order they were
    /// applied. Nothing is recorded when the mutation fails.
    pub async fn commit<T, E, Fut>(
        &self,
        session: &Session,
        action: &str,
        mutation: Fut,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<T, AppError>
    where
        Fut: Future<Output = Result<T, E>>,
        E: Into<AppError>,
    {
        let _order = self.commit_order.lock().await;
        let value = mutation.await.map_err(Into::into)?;
        self.record_activity(session, action, describe(&value)).await;
        Ok(value)
    }

    /// Appends to the dashboard's activity feed. The mutation it describes
    /// has already committed, so a failure here is only logged.
    pub async fn record_activity(&self, session: &Session, action: &str, description: String) {
        if let Err(e) = self
            .store
            .record_activity(action, description, session.actor())
            .await
        {
            warn!("Failed to record activity '{}': {}", action, e);
        }
    }
}
