//! HTTP client for the Bluesky XRPC API.
//!
//! Wraps `reqwest` with session login, bearer authentication, XRPC error
//! envelope decoding, and typed response deserialization. One client holds
//! one authenticated session; the entry point creates it and lends it to
//! every component that talks to the service.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ClientError;
use crate::types::{
    AuthorFeedResponse, CreateSessionRequest, CreateSessionResponse, FeedItem, FollowersResponse,
    FollowsResponse, ProfilePage, ProfileStats, XrpcErrorBody,
};

pub const DEFAULT_SERVICE_URL: &str = "https://bsky.social";

/// The authenticated identity behind a [`BlueskyClient`].
#[derive(Clone)]
pub struct Session {
    pub did: String,
    pub handle: String,
    pub(crate) access_jwt: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("did", &self.did)
            .field("handle", &self.handle)
            .field("access_jwt", &"[redacted]")
            .finish()
    }
}

/// Client for the Bluesky XRPC API, bound to one logged-in session.
pub struct BlueskyClient {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) session: Session,
}

impl BlueskyClient {
    /// Logs in with an identifier (handle or email) and app password.
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidServiceUrl`] if `service_url` does not parse.
    /// - [`ClientError::Api`] if the server rejects the credentials.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the session response is malformed.
    pub async fn login(
        service_url: &str,
        identifier: &str,
        password: &str,
        timeout_secs: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("bskyconnect/0.1 (graph-maintenance)")
            .build()?;
        let base_url = normalise_base_url(service_url)?;

        let url = xrpc_url::<&str, &str>(&base_url, "com.atproto.server.createSession", &[])?;
        let request = client.post(url).json(&CreateSessionRequest {
            identifier,
            password,
        });
        let created: CreateSessionResponse =
            send_json(request, "createSession").await?;

        tracing::info!(did = %created.did, handle = %created.handle, "session established");

        Ok(Self {
            client,
            base_url,
            session: Session {
                did: created.did,
                handle: created.handle,
                access_jwt: created.access_jwt,
            },
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Fetches one page of accounts following `actor`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx response.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the response shape is unexpected.
    pub async fn get_followers(
        &self,
        actor: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<ProfilePage, ClientError> {
        let params = listing_params(actor, cursor, limit);
        let response: FollowersResponse = self
            .get_json("app.bsky.graph.getFollowers", &params)
            .await?;
        Ok(response.into())
    }

    /// Fetches one page of accounts `actor` follows.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_followers`].
    pub async fn get_follows(
        &self,
        actor: &str,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<ProfilePage, ClientError> {
        let params = listing_params(actor, cursor, limit);
        let response: FollowsResponse = self
            .get_json("app.bsky.graph.getFollows", &params)
            .await?;
        Ok(response.into())
    }

    /// Fetches the most recent entries of `actor`'s author feed, newest first.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_followers`].
    pub async fn get_author_feed(
        &self,
        actor: &str,
        limit: u32,
    ) -> Result<Vec<FeedItem>, ClientError> {
        let limit = limit.to_string();
        let response: AuthorFeedResponse = self
            .get_json(
                "app.bsky.feed.getAuthorFeed",
                &[("actor", actor), ("limit", limit.as_str())],
            )
            .await?;
        Ok(response.feed)
    }

    /// Fetches follower/following counts for `actor`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_followers`].
    pub async fn get_profile(&self, actor: &str) -> Result<ProfileStats, ClientError> {
        self.get_json("app.bsky.actor.getProfile", &[("actor", actor)])
            .await
    }

    pub(crate) async fn get_json<T, K, V>(
        &self,
        nsid: &str,
        params: &[(K, V)],
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let url = xrpc_url(&self.base_url, nsid, params)?;
        let request = self
            .client
            .get(url)
            .bearer_auth(&self.session.access_jwt);
        send_json(request, nsid).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        nsid: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = xrpc_url::<&str, &str>(&self.base_url, nsid, &[])?;
        let request = self
            .client
            .post(url)
            .bearer_auth(&self.session.access_jwt)
            .json(body);
        send_json(request, nsid).await
    }
}

fn listing_params<'a>(
    actor: &'a str,
    cursor: Option<&'a str>,
    limit: u32,
) -> Vec<(&'a str, String)> {
    let mut params = vec![("actor", actor.to_owned()), ("limit", limit.to_string())];
    if let Some(c) = cursor.filter(|c| !c.is_empty()) {
        params.push(("cursor", c.to_owned()));
    }
    params
}

/// Ensures the service URL ends with exactly one slash so `Url::join`
/// appends to it rather than replacing the last path segment.
pub(crate) fn normalise_base_url(service_url: &str) -> Result<Url, ClientError> {
    let normalised = format!("{}/", service_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| ClientError::InvalidServiceUrl {
        url: service_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Builds `{base}/xrpc/{nsid}?{params}` with percent-encoded query values.
pub(crate) fn xrpc_url<K, V>(base: &Url, nsid: &str, params: &[(K, V)]) -> Result<Url, ClientError>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = base
        .join(&format!("xrpc/{nsid}"))
        .map_err(|e| ClientError::InvalidServiceUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k.as_ref(), v.as_ref());
        }
    }
    Ok(url)
}

/// Sends a request, maps non-2xx responses to [`ClientError::Api`], and
/// parses a 2xx body as `T`.
async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    context: &str,
) -> Result<T, ClientError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let envelope: Option<XrpcErrorBody> = serde_json::from_str(&body).ok();
        let (error, message) = match envelope {
            Some(e) => (
                e.error.unwrap_or_else(|| "Unknown".to_owned()),
                e.message.unwrap_or_default(),
            ),
            None => ("Unknown".to_owned(), body),
        };
        return Err(ClientError::Api {
            status: status.as_u16(),
            error,
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
