//! Best-effort remote storage of uploaded bytes with an inline base-64 copy

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use uuid::Uuid;

use crate::providers::{ObjectStoreProvider, ResourceType};
use crate::types::{Evidence, StoredBlob};

/// Key namespace for uploaded documents
pub const DOCUMENT_PREFIX: &str = "documents";
/// Key namespace for question evidence
pub const QUESTION_EVIDENCE_PREFIX: &str = "evidence";
/// Key namespace for grievance evidence
pub const GRIEVANCE_EVIDENCE_PREFIX: &str = "grievance_evidence";

/// Store `data` under `{prefix}/{uuid}` when an object store is available.
///
/// Never fails: a store error only leaves the URL empty. The base-64 copy
/// is always filled in.
pub async fn store_with_fallback(
    object_store: Option<&dyn ObjectStoreProvider>,
    prefix: &str,
    data: &[u8],
    resource_type: ResourceType,
) -> StoredBlob {
    let url = match object_store {
        Some(store) => {
            let key = format!("{}/{}", prefix, Uuid::new_v4());
            match store.upload(&key, data, resource_type).await {
                Ok(url) => {
                    tracing::debug!("Stored {} bytes in {} as {}", data.len(), store.name(), key);
                    Some(url)
                }
                Err(e) => {
                    tracing::warn!("Object store upload failed, keeping inline copy only: {}", e);
                    None
                }
            }
        }
        None => {
            tracing::debug!("No object store configured, keeping inline copy only");
            None
        }
    };

    StoredBlob {
        base64: STANDARD.encode(data),
        url,
    }
}

/// Store each evidence file, keeping every base-64 copy and the URLs the
/// object store accepted.
pub async fn collect_evidence(
    object_store: Option<&dyn ObjectStoreProvider>,
    prefix: &str,
    files: &[&[u8]],
) -> Evidence {
    let mut evidence = Evidence::default();
    for &data in files {
        let blob = store_with_fallback(object_store, prefix, data, ResourceType::Auto).await;
        if let Some(url) = blob.url {
            evidence.urls.push(url);
        }
        evidence.base64.push(blob.base64);
    }
    evidence
}
