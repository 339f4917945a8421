//! Integration tests for `BlueskyClient` using wiremock HTTP mocks.

use bskyconnect_client::{BlueskyClient, ClientError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a successful `createSession` mock and logs in against it.
async fn logged_in_client(server: &MockServer) -> BlueskyClient {
    Mock::given(method("POST"))
        .and(path("/xrpc/com.atproto.server.createSession"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "did": "did:plc:me",
            "handle": "me.bsky.social",
            "accessJwt": "access-token",
            "refreshJwt": "refresh-token"
        })))
        .mount(server)
        .await;

    BlueskyClient::login(&server.uri(), "me.bsky.social", "app-password", 5)
        .await
        .expect("login should succeed")
}

#[tokio::test]
async fn login_sends_credentials_and_stores_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/xrpc/com.atproto.server.createSession"))
        .and(body_partial_json(json!({
            "identifier": "me.bsky.social",
            "password": "app-password"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "did": "did:plc:me",
            "handle": "me.bsky.social",
            "accessJwt": "access-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = BlueskyClient::login(&server.uri(), "me.bsky.social", "app-password", 5)
        .await
        .expect("login should succeed");

    assert_eq!(client.session().did, "did:plc:me");
    assert_eq!(client.session().handle, "me.bsky.social");
}

#[tokio::test]
async fn login_rejected_maps_xrpc_error_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/xrpc/com.atproto.server.createSession"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "AuthenticationRequired",
            "message": "Invalid identifier or password"
        })))
        .mount(&server)
        .await;

    let result = BlueskyClient::login(&server.uri(), "me.bsky.social", "wrong", 5).await;

    match result {
        Err(ClientError::Api {
            status,
            error,
            message,
        }) => {
            assert_eq!(status, 401);
            assert_eq!(error, "AuthenticationRequired");
            assert_eq!(message, "Invalid identifier or password");
        }
        Err(other) => panic!("expected ClientError::Api, got: {other:?}"),
        Ok(_) => panic!("login with a wrong password should fail"),
    }
}

#[tokio::test]
async fn get_followers_sends_bearer_token_and_cursor() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.graph.getFollowers"))
        .and(header("authorization", "Bearer access-token"))
        .and(query_param("actor", "me.bsky.social"))
        .and(query_param("limit", "100"))
        .and(query_param("cursor", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subject": { "did": "did:plc:me", "handle": "me.bsky.social" },
            "followers": [
                {
                    "did": "did:plc:a",
                    "handle": "a.bsky.social",
                    "viewer": { "following": "at://did:plc:me/app.bsky.graph.follow/1" }
                },
                { "did": "did:plc:b", "handle": "b.bsky.social", "viewer": {} }
            ],
            "cursor": "page-3"
        })))
        .mount(&server)
        .await;

    let page = client
        .get_followers("me.bsky.social", Some("page-2"), 100)
        .await
        .expect("should parse followers page");

    assert_eq!(page.profiles.len(), 2);
    assert_eq!(page.profiles[0].handle, "a.bsky.social");
    assert!(page.profiles[0]
        .viewer
        .as_ref()
        .is_some_and(|v| v.following.is_some()));
    assert!(page.profiles[1]
        .viewer
        .as_ref()
        .is_some_and(|v| v.following.is_none()));
    assert_eq!(page.cursor.as_deref(), Some("page-3"));
}

#[tokio::test]
async fn get_follows_last_page_has_no_cursor() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.graph.getFollows"))
        .and(query_param("actor", "me.bsky.social"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subject": { "did": "did:plc:me", "handle": "me.bsky.social" },
            "follows": [{ "did": "did:plc:c", "handle": "c.bsky.social" }]
        })))
        .mount(&server)
        .await;

    let page = client
        .get_follows("me.bsky.social", None, 100)
        .await
        .expect("should parse follows page");

    assert_eq!(page.profiles.len(), 1);
    assert!(page.cursor.is_none());
}

#[tokio::test]
async fn get_author_feed_returns_entries_in_order() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.feed.getAuthorFeed"))
        .and(query_param("actor", "a.bsky.social"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feed": [
                { "post": { "uri": "at://did:plc:a/app.bsky.feed.post/2", "indexedAt": "2026-10-18T12:00:00.000Z" } },
                { "post": { "uri": "at://did:plc:a/app.bsky.feed.post/1", "indexedAt": "2026-10-01T08:30:00.000Z" } }
            ]
        })))
        .mount(&server)
        .await;

    let feed = client
        .get_author_feed("a.bsky.social", 10)
        .await
        .expect("should parse feed");

    assert_eq!(feed.len(), 2);
    assert_eq!(
        feed[1].post.indexed_at.as_deref(),
        Some("2026-10-01T08:30:00.000Z")
    );
}

#[tokio::test]
async fn get_profile_returns_counts() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.actor.getProfile"))
        .and(query_param("actor", "did:plc:a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "did": "did:plc:a",
            "handle": "a.bsky.social",
            "followersCount": 45_000,
            "followsCount": 120,
            "postsCount": 3_000
        })))
        .mount(&server)
        .await;

    let stats = client.get_profile("did:plc:a").await.expect("should parse");
    assert_eq!(stats.followers_count, 45_000);
    assert_eq!(stats.follows_count, 120);
}

#[tokio::test]
async fn malformed_body_is_a_deserialize_error() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.feed.getAuthorFeed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "posts": [] })))
        .mount(&server)
        .await;

    let result = client.get_author_feed("a.bsky.social", 10).await;
    assert!(
        matches!(result, Err(ClientError::Deserialize { ref context, .. }) if context == "app.bsky.feed.getAuthorFeed"),
        "expected Deserialize error, got: {result:?}"
    );
}

#[tokio::test]
async fn non_json_error_body_is_kept_as_message() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/xrpc/app.bsky.actor.getProfile"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let result = client.get_profile("a.bsky.social").await;
    assert!(
        matches!(result, Err(ClientError::Api { status: 502, ref message, .. }) if message == "Bad Gateway"),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn create_follow_writes_follow_record_to_own_repo() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/xrpc/com.atproto.repo.createRecord"))
        .and(header("authorization", "Bearer access-token"))
        .and(body_partial_json(json!({
            "repo": "did:plc:me",
            "collection": "app.bsky.graph.follow",
            "record": {
                "$type": "app.bsky.graph.follow",
                "subject": "did:plc:target"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uri": "at://did:plc:me/app.bsky.graph.follow/3knew",
            "cid": "bafyreib"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = client
        .create_follow("did:plc:target")
        .await
        .expect("follow should succeed");
    assert_eq!(uri, "at://did:plc:me/app.bsky.graph.follow/3knew");
}

#[tokio::test]
async fn delete_follow_sends_record_key() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/xrpc/com.atproto.repo.deleteRecord"))
        .and(body_partial_json(json!({
            "repo": "did:plc:me",
            "collection": "app.bsky.graph.follow",
            "rkey": "3kold"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .delete_follow("at://did:plc:me/app.bsky.graph.follow/3kold")
        .await
        .expect("unfollow should succeed");
}

#[tokio::test]
async fn delete_follow_with_bad_uri_makes_no_request() {
    let server = MockServer::start().await;
    let client = logged_in_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/xrpc/com.atproto.repo.deleteRecord"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let result = client.delete_follow("not-a-record-uri").await;
    assert!(matches!(result, Err(ClientError::InvalidRecordUri(_))));
}
