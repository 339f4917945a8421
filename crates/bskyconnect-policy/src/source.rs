//! Eager, cursor-driven collection of follower and follows listings.

use std::future::Future;

use bskyconnect_client::{ClientError, ProfilePage, ProfileView, SocialGraph};

/// Collects every account following `actor`, in listing order.
///
/// # Errors
///
/// Propagates the first page failure; profiles from earlier pages are
/// discarded. Returns [`ClientError::PaginationStalled`] if the server
/// repeats a cursor.
pub async fn list_followers<G: SocialGraph>(
    graph: &G,
    actor: &str,
    page_size: u32,
) -> Result<Vec<ProfileView>, ClientError> {
    collect_pages("app.bsky.graph.getFollowers", |cursor| async move {
        graph
            .followers_page(actor, cursor.as_deref(), page_size)
            .await
    })
    .await
}

/// Collects every account `actor` follows, in listing order.
///
/// # Errors
///
/// Same as [`list_followers`].
pub async fn list_follows<G: SocialGraph>(
    graph: &G,
    actor: &str,
    page_size: u32,
) -> Result<Vec<ProfileView>, ClientError> {
    collect_pages("app.bsky.graph.getFollows", |cursor| async move {
        graph.follows_page(actor, cursor.as_deref(), page_size).await
    })
    .await
}

/// Requests pages until the cursor comes back absent or empty.
async fn collect_pages<F, Fut>(
    endpoint: &str,
    mut fetch_page: F,
) -> Result<Vec<ProfileView>, ClientError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ProfilePage, ClientError>>,
{
    let mut profiles = Vec::new();
    let mut cursor: Option<String> = None;

    loop {
        let page = fetch_page(cursor.clone()).await?;
        let fetched = page.profiles.len();
        profiles.extend(page.profiles);
        tracing::debug!(endpoint, fetched, total = profiles.len(), "fetched listing page");

        match page.cursor.filter(|c| !c.is_empty()) {
            None => break,
            Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                return Err(ClientError::PaginationStalled {
                    endpoint: endpoint.to_owned(),
                    cursor: next,
                });
            }
            Some(next) => cursor = Some(next),
        }
    }

    Ok(profiles)
}
