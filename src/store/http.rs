use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::{
    foundation::error::{WeaveError, WeaveResult},
    model::{placement::WordPlacement, snapshot::Snapshot},
    store::{SnapshotStore, unix_millis},
};

/// Header carrying the administrative password on `DELETE /words`.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// HTTP client for a remote snapshot store.
///
/// ```rust,no_run
/// use std::time::Duration;
/// use wordweave::{HttpStore, SnapshotStore};
///
/// # async fn example() -> wordweave::WeaveResult<()> {
/// let store = HttpStore::new("http://127.0.0.1:3000", Duration::from_secs(5))?;
/// let snapshot = store.fetch().await?;
/// println!("{} words", snapshot.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct HttpStore {
    base_url: String,
    fetch_timeout: Duration,
    client: Client,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, fetch_timeout: Duration) -> WeaveResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| WeaveError::Other(anyhow::Error::new(e).context("build http client")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            fetch_timeout,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn words_url(&self) -> String {
        format!("{}/words", self.base_url)
    }

    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(ErrorBody { error: Some(msg) }) => msg,
            _ => format!("store returned {status}"),
        }
    }
}

impl SnapshotStore for HttpStore {
    async fn fetch(&self) -> WeaveResult<Snapshot> {
        // Cache-busting query; the store ignores it.
        let response = self
            .client
            .get(self.words_url())
            .query(&[("t", unix_millis())])
            .timeout(self.fetch_timeout)
            .send()
            .await
            .map_err(|e| WeaveError::fetch_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeaveError::fetch_failed(format!("store returned {status}")));
        }

        response
            .json::<Snapshot>()
            .await
            .map_err(|e| WeaveError::fetch_failed(format!("decode snapshot: {e}")))
    }

    async fn append(&self, word: &WordPlacement) -> WeaveResult<()> {
        let response = self
            .client
            .post(self.words_url())
            .json(word)
            .send()
            .await
            .map_err(|e| WeaveError::submission_failed(e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(WeaveError::submission_failed(
            Self::error_message(response).await,
        ))
    }

    async fn clear(&self, admin_password: &str) -> WeaveResult<()> {
        let response = self
            .client
            .delete(self.words_url())
            .header(ADMIN_PASSWORD_HEADER, admin_password)
            .send()
            .await
            .map_err(|e| WeaveError::reset_failed(e.to_string()))?;

        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::FORBIDDEN => Err(WeaveError::reset_failed("access denied")),
            _ => Err(WeaveError::reset_failed(Self::error_message(response).await)),
        }
    }
}
