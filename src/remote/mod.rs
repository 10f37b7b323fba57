//! Seams between the list controller and the backend it talks to.

use async_trait::async_trait;

use crate::domain::mutation::MutationIntent;
use crate::domain::page::PageRequest;
use crate::domain::resource::ResourceSpec;
use crate::dto::api::{ListEnvelope, MutationEnvelope};
use crate::remote::errors::RemoteResult;

pub mod credentials;
pub mod errors;
pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod normalize;

/// Fetches one page of a remote collection.
#[async_trait]
pub trait CollectionReader: Send + Sync {
    async fn list(
        &self,
        resource: &ResourceSpec,
        request: &PageRequest,
    ) -> RemoteResult<ListEnvelope>;
}

/// Applies create/update/delete/toggle mutations to a remote collection.
#[async_trait]
pub trait CollectionWriter: Send + Sync {
    async fn mutate(
        &self,
        resource: &ResourceSpec,
        intent: &MutationIntent,
    ) -> RemoteResult<MutationEnvelope>;
}
