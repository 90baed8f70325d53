use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::{domain::Language, error::FetchError, protocol::WikiDocument};
use tracing::debug;
use url::Url;

/// Remote content hierarchy, addressed by slash-delimited paths.
///
/// `fetch` resolves a requested path to a document; the returned document's
/// path is canonical and may differ from the requested one when the server
/// redirects. Implementations are cancelled cooperatively by dropping the
/// in-flight future.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn fetch(&self, path: &str, language: Language) -> Result<WikiDocument, FetchError>;

    /// Root of the public website, used to resolve absolute article URLs.
    fn website_root_url(&self) -> &str;
}

/// `ContentProvider` backed by the wiki HTTP API
/// (`GET {api_url}/wiki/{culture_code}/{path}`).
pub struct HttpContentApi {
    http: Client,
    api_url: String,
    website_root_url: String,
}

impl HttpContentApi {
    pub fn new(api_url: impl Into<String>, website_root_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            website_root_url: website_root_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn page_url(&self, path: &str, language: Language) -> Result<Url, FetchError> {
        let raw = format!("{}/wiki/{}/{}", self.api_url, language.culture_code(), path);
        Url::parse(&raw).map_err(|err| FetchError::Transport {
            path: path.to_string(),
            message: format!("invalid request url '{raw}': {err}"),
        })
    }
}

#[async_trait]
impl ContentProvider for HttpContentApi {
    async fn fetch(&self, path: &str, language: Language) -> Result<WikiDocument, FetchError> {
        let url = self.page_url(path, language)?;
        debug!(%url, "fetching wiki page");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::Transport {
                path: path.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Remote {
                path: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<WikiDocument>()
            .await
            .map_err(|err| FetchError::Decode {
                path: path.to_string(),
                message: err.to_string(),
            })
    }

    fn website_root_url(&self) -> &str {
        &self.website_root_url
    }
}

#[cfg(test)]
mod tests;
