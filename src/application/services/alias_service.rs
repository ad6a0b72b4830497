//! Alias creation, resolution and removal service.

use std::sync::Arc;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, error, warn};

use crate::domain::entities::AliasRecord;
use crate::domain::repositories::{AliasRepository, StoreError};
use crate::error::AppError;
use crate::utils::alias_generator::{AliasGenerator, validate_custom_alias};
use crate::utils::target_url::validate_target_url;

/// Default number of generated aliases tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Service for creating, resolving and deleting aliases.
///
/// Every surface (HTTP handlers, admin CLI) goes through this service, which
/// owns the choice between a caller alias and a generated one and the
/// regenerate-on-collision loop. The store stays the only authority on
/// uniqueness.
pub struct AliasService {
    repository: Arc<dyn AliasRepository>,
    generator: Arc<dyn AliasGenerator>,
    max_attempts: usize,
}

impl AliasService {
    /// Creates a new alias service.
    ///
    /// `max_attempts` is clamped to at least one.
    pub fn new(
        repository: Arc<dyn AliasRepository>,
        generator: Arc<dyn AliasGenerator>,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Saves `target_url` under `alias`, or under a generated alias when
    /// `alias` is absent or blank.
    ///
    /// # Retry
    ///
    /// A caller-supplied alias is tried once. A generated alias that collides
    /// is replaced by a fresh one, up to `max_attempts` candidates in total.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or the supplied alias is invalid.
    ///
    /// Returns [`AppError::Conflict`] if the supplied alias is already taken.
    ///
    /// Returns [`AppError::Internal`] on store failures or when every generated
    /// candidate collided.
    pub async fn save(
        &self,
        target_url: String,
        alias: Option<String>,
    ) -> Result<AliasRecord, AppError> {
        validate_target_url(&target_url).map_err(|e| {
            AppError::bad_request(
                "field url is not a valid URL",
                json!({ "url": [e.to_string()] }),
            )
        })?;

        let alias = alias
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        match alias {
            Some(alias) => {
                validate_custom_alias(&alias)?;

                let id = self
                    .repository
                    .save_url(&target_url, &alias)
                    .await
                    .map_err(save_error)?;

                Ok(AliasRecord::new(id, alias, target_url))
            }
            None => self.save_generated(target_url).await,
        }
    }

    /// Returns the target URL bound to `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias is unknown.
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn resolve(&self, alias: &str) -> Result<String, AppError> {
        if alias.is_empty() {
            return Err(empty_alias());
        }

        self.repository
            .get_url(alias)
            .await
            .map_err(lookup_error)
    }

    /// Removes `alias` and returns the URL it pointed to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the alias is unknown.
    /// Returns [`AppError::Internal`] on store failures.
    pub async fn delete(&self, alias: &str) -> Result<String, AppError> {
        if alias.is_empty() {
            return Err(empty_alias());
        }

        self.repository
            .delete_url(alias)
            .await
            .map_err(lookup_error)
    }

    /// Checks that the store answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await.map_err(|e| {
            error!(error = %e, "Store ping failed");
            AppError::internal("Store unavailable", json!({}))
        })
    }

    async fn save_generated(&self, target_url: String) -> Result<AliasRecord, AppError> {
        let retries = FixedInterval::from_millis(0).take(self.max_attempts - 1);

        let result = RetryIf::spawn(
            retries,
            || {
                let alias = self.generator.generate();
                let repository = Arc::clone(&self.repository);
                let target_url = target_url.clone();

                async move {
                    let id = repository.save_url(&target_url, &alias).await?;
                    Ok::<_, StoreError>((id, alias))
                }
            },
            |e: &StoreError| {
                let collided = matches!(e, StoreError::AliasExists(_));
                if collided {
                    debug!(error = %e, "Generated alias collided, regenerating");
                }
                collided
            },
        )
        .await;

        match result {
            Ok((id, alias)) => Ok(AliasRecord::new(id, alias, target_url)),
            Err(StoreError::AliasExists(last)) => {
                warn!(
                    attempts = self.max_attempts,
                    last_alias = %last,
                    "Every generated alias collided"
                );
                Err(AppError::internal(
                    "Failed to generate unique alias",
                    json!({ "attempts": self.max_attempts }),
                ))
            }
            Err(e) => Err(save_error(e)),
        }
    }
}

fn empty_alias() -> AppError {
    AppError::bad_request(
        "Invalid request",
        json!({ "alias": ["field alias is a required field"] }),
    )
}

fn save_error(e: StoreError) -> AppError {
    match e {
        StoreError::AliasExists(alias) => {
            AppError::conflict("URL already exists", json!({ "alias": alias }))
        }
        StoreError::InvalidAlias => empty_alias(),
        e => {
            error!(error = %e, "Failed to add URL");
            AppError::internal("Failed to add URL", json!({}))
        }
    }
}

fn lookup_error(e: StoreError) -> AppError {
    match e {
        StoreError::NotFound(alias) => AppError::not_found("Not found", json!({ "alias": alias })),
        e => {
            error!(error = %e, "Store lookup failed");
            AppError::internal("Internal error", json!({}))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockAliasRepository;
    use crate::utils::alias_generator::MockAliasGenerator;

    fn unavailable() -> StoreError {
        StoreError::unavailable(std::io::Error::other("disk gone"))
    }

    fn service(repo: MockAliasRepository, generator: MockAliasGenerator) -> AliasService {
        AliasService::new(Arc::new(repo), Arc::new(generator), DEFAULT_MAX_ATTEMPTS)
    }

    fn sequential_generator(times: usize) -> MockAliasGenerator {
        let mut generator = MockAliasGenerator::new();
        let mut n = 0;
        generator.expect_generate().times(times).returning(move || {
            n += 1;
            format!("gen{n:03}")
        });
        generator
    }

    #[tokio::test]
    async fn test_save_with_custom_alias() {
        let mut repo = MockAliasRepository::new();
        repo.expect_save_url()
            .withf(|url, alias| url == "https://example.com" && alias == "ex1")
            .times(1)
            .returning(|_, _| Ok(1));

        let mut generator = MockAliasGenerator::new();
        generator.expect_generate().times(0);

        let record = service(repo, generator)
            .save("https://example.com".to_string(), Some("ex1".to_string()))
            .await
            .unwrap();

        assert_eq!(record, AliasRecord::new(1, "ex1", "https://example.com"));
    }

    #[tokio::test]
    async fn test_save_custom_alias_conflict_is_not_retried() {
        let mut repo = MockAliasRepository::new();
        repo.expect_save_url()
            .times(1)
            .returning(|_, alias| Err(StoreError::AliasExists(alias.to_string())));

        let result = service(repo, MockAliasGenerator::new())
            .save("https://other.com".to_string(), Some("ex1".to_string()))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "URL already exists");
    }

    #[tokio::test]
    async fn test_save_blank_alias_generates_one() {
        let mut repo = MockAliasRepository::new();
        repo.expect_save_url()
            .withf(|_, alias| alias == "gen001")
            .times(1)
            .returning(|_, _| Ok(3));

        let record = service(repo, sequential_generator(1))
            .save("https://example.com".to_string(), Some("   ".to_string()))
            .await
            .unwrap();

        assert_eq!(record.alias, "gen001");
        assert_eq!(record.id, 3);
    }

    #[tokio::test]
    async fn test_save_generated_retries_on_collision() {
        let mut repo = MockAliasRepository::new();
        let mut calls = 0;
        repo.expect_save_url().times(3).returning(move |_, alias| {
            calls += 1;
            if calls < 3 {
                Err(StoreError::AliasExists(alias.to_string()))
            } else {
                Ok(42)
            }
        });

        let record = service(repo, sequential_generator(3))
            .save("https://example.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(record.id, 42);
        assert_eq!(record.alias, "gen003");
    }

    #[tokio::test]
    async fn test_save_generated_gives_up_after_max_attempts() {
        let mut repo = MockAliasRepository::new();
        repo.expect_save_url()
            .times(DEFAULT_MAX_ATTEMPTS)
            .returning(|_, alias| Err(StoreError::AliasExists(alias.to_string())));

        let err = service(repo, sequential_generator(DEFAULT_MAX_ATTEMPTS))
            .save("https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Failed to generate unique alias");
    }

    #[tokio::test]
    async fn test_save_unavailable_is_not_retried() {
        let mut repo = MockAliasRepository::new();
        repo.expect_save_url()
            .times(1)
            .returning(|_, _| Err(unavailable()));

        let err = service(repo, sequential_generator(1))
            .save("https://example.com".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Failed to add URL");
    }

    #[tokio::test]
    async fn test_save_invalid_url() {
        let mut repo = MockAliasRepository::new();
        repo.expect_save_url().times(0);

        let err = service(repo, MockAliasGenerator::new())
            .save("javascript:alert(1)".to_string(), None)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_save_invalid_custom_alias() {
        let mut repo = MockAliasRepository::new();
        repo.expect_save_url().times(0);

        let err = service(repo, MockAliasGenerator::new())
            .save("https://example.com".to_string(), Some("url".to_string()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_resolve_found() {
        let mut repo = MockAliasRepository::new();
        repo.expect_get_url()
            .withf(|alias| alias == "ex1")
            .returning(|_| Ok("https://example.com".to_string()));

        let url = service(repo, MockAliasGenerator::new())
            .resolve("ex1")
            .await
            .unwrap();

        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut repo = MockAliasRepository::new();
        repo.expect_get_url()
            .returning(|alias| Err(StoreError::NotFound(alias.to_string())));

        let err = service(repo, MockAliasGenerator::new())
            .resolve("missing")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_unavailable() {
        let mut repo = MockAliasRepository::new();
        repo.expect_get_url().returning(|_| Err(unavailable()));

        let err = service(repo, MockAliasGenerator::new())
            .resolve("ex1")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_delete_returns_target() {
        let mut repo = MockAliasRepository::new();
        repo.expect_delete_url()
            .times(1)
            .returning(|_| Ok("https://example.com".to_string()));

        let url = service(repo, MockAliasGenerator::new())
            .delete("ex1")
            .await
            .unwrap();

        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_delete_empty_alias_skips_store() {
        let mut repo = MockAliasRepository::new();
        repo.expect_delete_url().times(0);

        let err = service(repo, MockAliasGenerator::new())
            .delete("")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn test_max_attempts_clamped() {
        let svc = AliasService::new(
            Arc::new(MockAliasRepository::new()),
            Arc::new(MockAliasGenerator::new()),
            0,
        );
        assert_eq!(svc.max_attempts, 1);
    }
}
