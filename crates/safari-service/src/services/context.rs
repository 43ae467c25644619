//! Service context - dependency container for services
//!
//! Holds the repositories, the optional Redis publisher and the rebuild
//! trigger needed by services.

use std::sync::Arc;

use safari_cache::{Publisher, RedisPool};
use safari_common::StorageConfig;
use safari_core::traits::{
    AuditLogRepository, BookingRepository, ImageRepository, SectionRepository, SettingRepository,
};
use safari_core::{IdGenerator, RecordId};
use safari_db::PgPool;

use super::error::{ServiceError, ServiceResult};
use super::rebuild::RebuildTrigger;

/// Service context containing all dependencies
///
/// Built once at startup; cloning is cheap.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool, used for readiness probes
    pool: PgPool,

    // Redis is optional; without it revalidation messages are skipped
    redis_pool: Option<RedisPool>,
    publisher: Option<Publisher>,

    // Repositories
    section_repo: Arc<dyn SectionRepository>,
    audit_repo: Arc<dyn AuditLogRepository>,
    setting_repo: Arc<dyn SettingRepository>,
    booking_repo: Arc<dyn BookingRepository>,
    image_repo: Arc<dyn ImageRepository>,

    rebuild: RebuildTrigger,
    storage: StorageConfig,
    id_generator: Arc<IdGenerator>,
}

impl ServiceContext {
    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_ref()
    }

    // === Repositories ===

    pub fn section_repo(&self) -> &dyn SectionRepository {
        self.section_repo.as_ref()
    }

    pub fn audit_repo(&self) -> &dyn AuditLogRepository {
        self.audit_repo.as_ref()
    }

    pub fn setting_repo(&self) -> &dyn SettingRepository {
        self.setting_repo.as_ref()
    }

    pub fn booking_repo(&self) -> &dyn BookingRepository {
        self.booking_repo.as_ref()
    }

    pub fn image_repo(&self) -> &dyn ImageRepository {
        self.image_repo.as_ref()
    }

    // === Side effects ===

    /// Get the Redis pub/sub publisher, if Redis is configured
    pub fn publisher(&self) -> Option<&Publisher> {
        self.publisher.as_ref()
    }

    pub fn rebuild(&self) -> &RebuildTrigger {
        &self.rebuild
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Generate a new record id
    pub fn generate_id(&self) -> RecordId {
        self.id_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis", &self.redis_pool.is_some())
            .field("repositories", &"...")
            .field("rebuild", &self.rebuild)
            .finish()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    section_repo: Option<Arc<dyn SectionRepository>>,
    audit_repo: Option<Arc<dyn AuditLogRepository>>,
    setting_repo: Option<Arc<dyn SettingRepository>>,
    booking_repo: Option<Arc<dyn BookingRepository>>,
    image_repo: Option<Arc<dyn ImageRepository>>,
    rebuild: Option<RebuildTrigger>,
    storage: Option<StorageConfig>,
    id_generator: Option<Arc<IdGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Enables revalidation messages
    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn section_repo(mut self, repo: Arc<dyn SectionRepository>) -> Self {
        self.section_repo = Some(repo);
        self
    }

    pub fn audit_repo(mut self, repo: Arc<dyn AuditLogRepository>) -> Self {
        self.audit_repo = Some(repo);
        self
    }

    pub fn setting_repo(mut self, repo: Arc<dyn SettingRepository>) -> Self {
        self.setting_repo = Some(repo);
        self
    }

    pub fn booking_repo(mut self, repo: Arc<dyn BookingRepository>) -> Self {
        self.booking_repo = Some(repo);
        self
    }

    pub fn image_repo(mut self, repo: Arc<dyn ImageRepository>) -> Self {
        self.image_repo = Some(repo);
        self
    }

    pub fn rebuild(mut self, rebuild: RebuildTrigger) -> Self {
        self.rebuild = Some(rebuild);
        self
    }

    pub fn storage(mut self, storage: StorageConfig) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn id_generator(mut self, generator: Arc<IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let publisher = self.redis_pool.clone().map(Publisher::new);

        Ok(ServiceContext {
            pool: self.pool.ok_or_else(|| missing("pool"))?,
            redis_pool: self.redis_pool,
            publisher,
            section_repo: self.section_repo.ok_or_else(|| missing("section_repo"))?,
            audit_repo: self.audit_repo.ok_or_else(|| missing("audit_repo"))?,
            setting_repo: self.setting_repo.ok_or_else(|| missing("setting_repo"))?,
            booking_repo: self.booking_repo.ok_or_else(|| missing("booking_repo"))?,
            image_repo: self.image_repo.ok_or_else(|| missing("image_repo"))?,
            rebuild: self.rebuild.ok_or_else(|| missing("rebuild"))?,
            storage: self.storage.ok_or_else(|| missing("storage"))?,
            id_generator: self.id_generator.unwrap_or_default(),
        })
    }
}

fn missing(dependency: &str) -> ServiceError {
    ServiceError::validation(format!("{dependency} is required"))
}
