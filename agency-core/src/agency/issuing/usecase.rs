use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::{debug, info};
use rst_common::with_tokio::tokio;

use crate::agency::gateway::AgentRPCBuilder;
use crate::agency::protocol::{CredDefID, SchemaID};

use super::types::{CredDefRepoBuilder, IssuingError, IssuingParams, IssuingUsecaseBuilder};

/// `Usecase` is the base implementation of [`IssuingUsecaseBuilder`]
pub struct Usecase<TRPCClient, TRepo>
where
    TRPCClient: AgentRPCBuilder,
    TRepo: CredDefRepoBuilder,
{
    rpc: TRPCClient,
    repo: TRepo,
    params: IssuingParams,
}

impl<TRPCClient, TRepo> Usecase<TRPCClient, TRepo>
where
    TRPCClient: AgentRPCBuilder,
    TRepo: CredDefRepoBuilder,
{
    pub fn new(rpc: TRPCClient, repo: TRepo, params: IssuingParams) -> Self {
        Self { rpc, repo, params }
    }

    async fn wait_schema(&self, schema_id: SchemaID) -> Result<SchemaID, IssuingError> {
        for attempt in 1..=self.params.wait_attempts {
            match self.rpc.get_schema(schema_id.clone()).await {
                Ok(schema) => return Ok(schema),
                Err(err) => debug!(
                    "[issuing] schema {} not readable yet ({}/{}): {}",
                    schema_id.as_str(),
                    attempt,
                    self.params.wait_attempts,
                    err
                ),
            }

            tokio::time::sleep(self.params.wait_interval).await;
        }

        Err(IssuingError::SchemaTimeout(self.params.wait_attempts))
    }
}

#[async_trait]
impl<TRPCClient, TRepo> IssuingUsecaseBuilder for Usecase<TRPCClient, TRepo>
where
    TRPCClient: AgentRPCBuilder,
    TRepo: CredDefRepoBuilder,
{
    async fn prepare(&self) -> Result<CredDefID, IssuingError> {
        if let Some(cred_def_id) = self.repo.get_cred_def_id().await? {
            info!("[issuing] reuse cred def: {}", cred_def_id.as_str());
            return Ok(cred_def_id);
        }

        let schema_id = self
            .rpc
            .create_schema(
                self.params.schema_name.clone(),
                self.params.schema_version.clone(),
                self.params.attributes.clone(),
            )
            .await?;

        info!("[issuing] schema created: {}", schema_id.as_str());
        let schema_id = self.wait_schema(schema_id).await?;

        let cred_def_id = self
            .rpc
            .create_cred_def(schema_id, self.params.tag.clone())
            .await?;

        info!("[issuing] cred def created: {}", cred_def_id.as_str());
        self.repo.save_cred_def_id(cred_def_id.clone()).await?;

        Ok(cred_def_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::eq;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use crate::agency::gateway::{GatewayError, Invitation};

    mock!(
        FakeRPCClient{}

        impl Clone for FakeRPCClient {
            fn clone(&self) -> Self;
        }

        #[async_trait]
        impl AgentRPCBuilder for FakeRPCClient {
            async fn create_invitation(&self, label: String) -> Result<Invitation, GatewayError>;
            async fn create_schema(&self, name: String, version: String, attributes: Vec<String>) -> Result<SchemaID, GatewayError>;
            async fn get_schema(&self, schema_id: SchemaID) -> Result<SchemaID, GatewayError>;
            async fn create_cred_def(&self, schema_id: SchemaID, tag: String) -> Result<CredDefID, GatewayError>;
        }
    );

    mock!(
        FakeRepo{}

        impl Clone for FakeRepo {
            fn clone(&self) -> Self;
        }

        #[async_trait]
        impl CredDefRepoBuilder for FakeRepo {
            async fn get_cred_def_id(&self) -> Result<Option<CredDefID>, IssuingError>;
            async fn save_cred_def_id(&self, id: CredDefID) -> Result<(), IssuingError>;
        }
    );

    fn generate_params(wait_attempts: u32) -> IssuingParams {
        IssuingParams {
            wait_attempts,
            wait_interval: Duration::from_millis(1),
            ..IssuingParams::email("agent".to_string())
        }
    }

    fn generate_schema_id() -> SchemaID {
        SchemaID::from("schema-1".to_string())
    }

    #[tokio::test]
    async fn test_prepare_reuse_stored() {
        let mut rpc = MockFakeRPCClient::new();
        rpc.expect_create_schema().never();
        rpc.expect_create_cred_def().never();

        let mut repo = MockFakeRepo::new();
        repo.expect_get_cred_def_id()
            .times(1)
            .returning(|| Ok(Some(CredDefID::from("stored"))));
        repo.expect_save_cred_def_id().never();

        let usecase = Usecase::new(rpc, repo, generate_params(3));
        let output = usecase.prepare().await;
        assert_eq!(output, Ok(CredDefID::from("stored")))
    }

    #[tokio::test]
    async fn test_prepare_create_new() {
        let polls = Arc::new(AtomicU32::new(0));
        let polls_counter = polls.clone();

        let mut rpc = MockFakeRPCClient::new();
        rpc.expect_create_schema()
            .with(
                eq("email".to_string()),
                eq("1.0".to_string()),
                eq(vec!["email".to_string()]),
            )
            .times(1)
            .returning(|_, _, _| Ok(generate_schema_id()));
        rpc.expect_get_schema()
            .with(eq(generate_schema_id()))
            .times(3)
            .returning(move |schema_id| {
                match polls_counter.fetch_add(1, Ordering::SeqCst) {
                    0 | 1 => Err(GatewayError::CallError("not found".to_string())),
                    _ => Ok(schema_id),
                }
            });
        rpc.expect_create_cred_def()
            .with(eq(generate_schema_id()), eq("agent".to_string()))
            .times(1)
            .returning(|_, _| Ok(CredDefID::from("cred-def-1")));

        let mut repo = MockFakeRepo::new();
        repo.expect_get_cred_def_id().times(1).returning(|| Ok(None));
        repo.expect_save_cred_def_id()
            .with(eq(CredDefID::from("cred-def-1")))
            .times(1)
            .returning(|_| Ok(()));

        let usecase = Usecase::new(rpc, repo, generate_params(5));
        let output = usecase.prepare().await;
        assert_eq!(output, Ok(CredDefID::from("cred-def-1")));
        assert_eq!(polls.load(Ordering::SeqCst), 3)
    }

    #[tokio::test]
    async fn test_prepare_schema_timeout() {
        let mut rpc = MockFakeRPCClient::new();
        rpc.expect_create_schema()
            .times(1)
            .returning(|_, _, _| Ok(generate_schema_id()));
        rpc.expect_get_schema()
            .times(2)
            .returning(|_| Err(GatewayError::CallError("not found".to_string())));
        rpc.expect_create_cred_def().never();

        let mut repo = MockFakeRepo::new();
        repo.expect_get_cred_def_id().times(1).returning(|| Ok(None));
        repo.expect_save_cred_def_id().never();

        let usecase = Usecase::new(rpc, repo, generate_params(2));
        let output = usecase.prepare().await;
        assert_eq!(output, Err(IssuingError::SchemaTimeout(2)))
    }

    #[tokio::test]
    async fn test_prepare_create_schema_failed() {
        let mut rpc = MockFakeRPCClient::new();
        rpc.expect_create_schema()
            .times(1)
            .returning(|_, _, _| Err(GatewayError::Unauthenticated("expired".to_string())));

        let mut repo = MockFakeRepo::new();
        repo.expect_get_cred_def_id().times(1).returning(|| Ok(None));

        let usecase = Usecase::new(rpc, repo, generate_params(2));
        let output = usecase.prepare().await;
        assert!(matches!(output, Err(IssuingError::GatewayError(_))))
    }

    #[tokio::test]
    async fn test_prepare_repo_failed() {
        let mut repo = MockFakeRepo::new();
        repo.expect_get_cred_def_id()
            .times(1)
            .returning(|| Err(IssuingError::RepoError("permission denied".to_string())));

        let usecase = Usecase::new(MockFakeRPCClient::new(), repo, generate_params(2));
        let output = usecase.prepare().await;
        assert!(matches!(output, Err(IssuingError::RepoError(_))))
    }
}
