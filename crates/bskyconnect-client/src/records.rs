//! Follow record mutations: `createRecord` and `deleteRecord` on the
//! `app.bsky.graph.follow` collection of the session's own repo.

use chrono::{SecondsFormat, Utc};

use crate::client::BlueskyClient;
use crate::error::ClientError;
use crate::types::{
    CreateRecordRequest, CreateRecordResponse, DeleteRecordRequest, FollowRecord,
    FOLLOW_COLLECTION,
};

impl BlueskyClient {
    /// Creates a follow record for `subject_did`, returning the new record URI.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx response.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the response shape is unexpected.
    pub async fn create_follow(&self, subject_did: &str) -> Result<String, ClientError> {
        let request = CreateRecordRequest {
            repo: &self.session.did,
            collection: FOLLOW_COLLECTION,
            record: FollowRecord {
                record_type: FOLLOW_COLLECTION,
                subject: subject_did,
                created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
        };
        let created: CreateRecordResponse = self
            .post_json("com.atproto.repo.createRecord", &request)
            .await?;
        Ok(created.uri)
    }

    /// Deletes the follow record at `follow_uri` (the `viewer.following`
    /// value of a profile).
    ///
    /// # Errors
    ///
    /// - [`ClientError::InvalidRecordUri`] if the URI has no record key.
    /// - [`ClientError::Api`] on a non-2xx response.
    /// - [`ClientError::Http`] on network failure.
    pub async fn delete_follow(&self, follow_uri: &str) -> Result<(), ClientError> {
        let rkey = record_key(follow_uri)?;
        let request = DeleteRecordRequest {
            repo: &self.session.did,
            collection: FOLLOW_COLLECTION,
            rkey,
        };
        // deleteRecord answers with an optional commit object we do not need.
        let _: serde_json::Value = self
            .post_json("com.atproto.repo.deleteRecord", &request)
            .await?;
        Ok(())
    }
}

/// Extracts the record key from `at://<repo>/<collection>/<rkey>`.
pub(crate) fn record_key(uri: &str) -> Result<&str, ClientError> {
    let invalid = || ClientError::InvalidRecordUri(uri.to_owned());
    let path = uri.strip_prefix("at://").ok_or_else(invalid)?;
    let mut segments = path.split('/');
    match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(repo), Some(collection), Some(rkey), None)
            if !repo.is_empty() && collection == FOLLOW_COLLECTION && !rkey.is_empty() =>
        {
            Ok(rkey)
        }
        _ => Err(invalid()),
    }
}
