//! Remote catalog gateway.
//!
//! Typed async HTTP client for the car catalog service: list, create
//! (multipart upload), delete, and image URL derivation. The gateway
//! performs no caching; every call goes to the network.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;

use crate::media::UploadImage;
use crate::models::{CarDraft, CarEntry, CarId, DeleteReceipt};
use crate::{Error, Result};

/// Production catalog service endpoint.
pub const DEFAULT_BASE_URL: &str = "https://wheels-of-passion.vercel.app";

/// The service defines no timeout of its own; the client always applies
/// one so a dead connection cannot hang an operation forever.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for remote catalog operations (async)
#[allow(async_fn_in_trait)]
pub trait CarGateway {
    /// Fetch all entries owned by `owner_email`, in server order.
    ///
    /// An unknown or empty owner is reported by the service as 404 and
    /// surfaces as [`Error::NotFound`]; callers must treat that as the
    /// benign "no entries yet" case, distinct from a real failure.
    async fn list_cars(&self, owner_email: &str) -> Result<Vec<CarEntry>>;

    /// Upload a new entry with its image payload; all-or-nothing.
    async fn create_car(&self, draft: &CarDraft, image: &UploadImage) -> Result<CarEntry>;

    /// Delete an entry owned by `owner_email`.
    ///
    /// The service enforces ownership; a mismatch fails with
    /// [`Error::Forbidden`] or [`Error::NotFound`].
    async fn delete_car(&self, id: CarId, owner_email: &str) -> Result<DeleteReceipt>;
}

/// Options for constructing a [`CarApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    /// Catalog service base URL
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HTTP client for the car catalog service
#[derive(Debug, Clone)]
pub struct CarApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl CarApiClient {
    /// Build a client for an explicit base URL with default options.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_options(ClientOptions {
            base_url: base_url.into(),
            ..ClientOptions::default()
        })
    }

    /// Build a client from explicit options.
    pub fn with_options(options: ClientOptions) -> Result<Self> {
        let base_url = normalize_base_url(&options.base_url)?;
        let client = reqwest::Client::builder().timeout(options.timeout).build()?;
        Ok(Self { base_url, client })
    }

    /// Returns the normalized base URL this client was configured with.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public URL of a stored image.
    ///
    /// Pure string construction; no network call, never fails for
    /// well-formed input.
    #[must_use]
    pub fn image_url(&self, image_id: &str) -> String {
        format!(
            "{}/cars/images/{}",
            self.base_url,
            urlencoding::encode(image_id)
        )
    }
}

impl CarGateway for CarApiClient {
    async fn list_cars(&self, owner_email: &str) -> Result<Vec<CarEntry>> {
        let response = self
            .client
            .get(format!("{}/cars/", self.base_url))
            .query(&[("email", owner_email)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json::<Vec<CarEntry>>().await?)
    }

    async fn create_car(&self, draft: &CarDraft, image: &UploadImage) -> Result<CarEntry> {
        let form = Form::new()
            .text("nama_mobil", draft.name.clone())
            .text("tipe_mobil", draft.category.clone())
            .text("tempat", draft.location.clone())
            .text("user_email", draft.owner_email.clone())
            .part(
                "file",
                Part::bytes(image.bytes.clone())
                    .file_name("image.jpg")
                    .mime_str("image/jpeg")?,
            );

        let response = self
            .client
            .post(format!("{}/cars/", self.base_url))
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json::<CarEntry>().await?)
    }

    async fn delete_car(&self, id: CarId, owner_email: &str) -> Result<DeleteReceipt> {
        let response = self
            .client
            .delete(format!("{}/cars/{id}", self.base_url))
            .query(&[("email", owner_email)])
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json::<DeleteReceipt>().await?)
    }
}

/// Pass a successful response through, or map it to the error taxonomy
/// with the server's message attached.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_status(status, &body))
}

fn classify_status(status: StatusCode, body: &str) -> Error {
    let message = compact_text(body);
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Forbidden(message),
        other => Error::Server {
            status: other.as_u16(),
            message,
        },
    }
}

/// Truncate a response body to at most 180 characters for error messages.
fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let base = raw.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(Error::InvalidInput(
            "API base URL must not be empty".to_string(),
        ));
    }
    if !(base.starts_with("https://") || base.starts_with("http://")) {
        return Err(Error::InvalidInput(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base.to_string())
}
