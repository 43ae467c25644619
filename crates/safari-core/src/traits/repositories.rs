//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::entities::{
    AuditLogEntry, Booking, BookingQuery, ContentSection, ImageAsset, SectionKind, SectionQuery,
    SiteSetting, UpsertOutcome,
};
use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Section Repository
// ============================================================================

#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Find a section row by ID regardless of kind or status
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ContentSection>>;

    /// Rows of one kind, filtered and ordered by the query
    async fn find(&self, query: &SectionQuery) -> RepoResult<Vec<ContentSection>>;

    /// Insert a new row
    async fn create(&self, section: &ContentSection) -> RepoResult<()>;

    /// Persist every field of an existing row
    async fn update(&self, section: &ContentSection) -> RepoResult<()>;

    /// Hard delete; returns the removed row
    async fn delete(&self, kind: SectionKind, id: RecordId) -> RepoResult<Option<ContentSection>>;

    /// Assign display orders in one transaction.
    ///
    /// Fails with `SectionNotFound` and writes nothing if any id is missing
    /// or belongs to another kind.
    async fn reorder(&self, kind: SectionKind, orders: &[(RecordId, i32)]) -> RepoResult<()>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()>;

    /// Most recent entries first
    async fn recent(&self, limit: i64) -> RepoResult<Vec<AuditLogEntry>>;
}

// ============================================================================
// Setting Repository
// ============================================================================

#[async_trait]
pub trait SettingRepository: Send + Sync {
    async fn find_by_key(&self, key: &str) -> RepoResult<Option<SiteSetting>>;

    /// All settings, or those of one category, ordered by key
    async fn find_by_category(&self, category: Option<&str>) -> RepoResult<Vec<SiteSetting>>;

    /// Insert or replace the value for `key` as a single statement.
    ///
    /// `id` is used only by the insert branch. A `None` category keeps the
    /// stored one on update and falls back to `general` on insert.
    async fn upsert(
        &self,
        id: RecordId,
        key: &str,
        category: Option<&str>,
        value: &JsonValue,
    ) -> RepoResult<(SiteSetting, UpsertOutcome)>;
}

// ============================================================================
// Booking Repository
// ============================================================================

/// One page of bookings plus the unpaged total
#[derive(Debug, Clone, Default)]
pub struct BookingPage {
    pub items: Vec<Booking>,
    pub total: i64,
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Booking>>;

    async fn search(&self, query: &BookingQuery) -> RepoResult<BookingPage>;

    async fn create(&self, booking: &Booking) -> RepoResult<()>;

    async fn update(&self, booking: &Booking) -> RepoResult<()>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: RecordId) -> RepoResult<bool>;
}

// ============================================================================
// Image Repository
// ============================================================================

#[async_trait]
pub trait ImageRepository: Send + Sync {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ImageAsset>>;

    /// Newest first, optionally restricted to a folder
    async fn list(&self, folder: Option<&str>, limit: i64) -> RepoResult<Vec<ImageAsset>>;

    async fn create(&self, image: &ImageAsset) -> RepoResult<()>;

    async fn delete(&self, id: RecordId) -> RepoResult<bool>;
}
