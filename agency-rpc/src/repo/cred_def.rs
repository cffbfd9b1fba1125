use std::io::ErrorKind;
use std::path::PathBuf;

use rst_common::standard::async_trait::async_trait;
use rst_common::with_tokio::tokio;

use prople_agency_core::agency::issuing::types::{CredDefRepoBuilder, IssuingError};
use prople_agency_core::agency::protocol::CredDefID;

/// `CredDefFileRepo` keeps the credential definition id in a plain text file
#[derive(Debug, Clone)]
pub struct CredDefFileRepo {
    path: PathBuf,
}

impl CredDefFileRepo {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl CredDefRepoBuilder for CredDefFileRepo {
    async fn get_cred_def_id(&self) -> Result<Option<CredDefID>, IssuingError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                let id = content.trim();
                if id.is_empty() {
                    return Ok(None);
                }

                Ok(Some(CredDefID::from(id)))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(IssuingError::RepoError(err.to_string())),
        }
    }

    async fn save_cred_def_id(&self, id: CredDefID) -> Result<(), IssuingError> {
        tokio::fs::write(&self.path, id.as_str())
            .await
            .map_err(|err| IssuingError::RepoError(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_common::standard::uuid::Uuid;

    fn generate_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("cred-def-{}", Uuid::new_v4()));
        path
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let path = generate_path();
        let repo = CredDefFileRepo::new(path.clone());

        let stored = repo.get_cred_def_id().await;
        assert_eq!(stored, Ok(None));

        let saved = repo.save_cred_def_id(CredDefID::from("cred-def-1")).await;
        assert!(saved.is_ok());

        let stored = repo.get_cred_def_id().await;
        assert_eq!(stored, Ok(Some(CredDefID::from("cred-def-1"))));

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn test_get_trimmed_and_empty() {
        let path = generate_path();
        let repo = CredDefFileRepo::new(path.clone());

        tokio::fs::write(&path, "cred-def-2\n").await.unwrap();
        assert_eq!(
            repo.get_cred_def_id().await,
            Ok(Some(CredDefID::from("cred-def-2")))
        );

        tokio::fs::write(&path, "  \n").await.unwrap();
        assert_eq!(repo.get_cred_def_id().await, Ok(None));

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn test_save_failed() {
        let mut path = generate_path();
        path.push("missing-dir");
        path.push("CRED_DEF_ID");

        let repo = CredDefFileRepo::new(path);
        let saved = repo.save_cred_def_id(CredDefID::from("cred-def-1")).await;
        assert!(matches!(saved, Err(IssuingError::RepoError(_))))
    }
}
