//! Mock collaborators for isolating the controller and services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::mutation::MutationIntent;
use crate::domain::page::PageRequest;
use crate::domain::resource::ResourceSpec;
use crate::dto::api::{ListEnvelope, MutationEnvelope};
use crate::remote::errors::RemoteResult;
use crate::remote::{CollectionReader, CollectionWriter};

mock! {
    pub Collection {}

    #[async_trait]
    impl CollectionReader for Collection {
        async fn list(
            &self,
            resource: &ResourceSpec,
            request: &PageRequest,
        ) -> RemoteResult<ListEnvelope>;
    }

    #[async_trait]
    impl CollectionWriter for Collection {
        async fn mutate(
            &self,
            resource: &ResourceSpec,
            intent: &MutationIntent,
        ) -> RemoteResult<MutationEnvelope>;
    }
}
