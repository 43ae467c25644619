//! In-memory repositories and a ready-made [`ServiceContext`] for tests
//!
//! Enabled for this crate's unit tests and, through the `test-support`
//! feature, for tests of downstream crates.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use safari_common::{DeployConfig, StorageConfig};
use safari_core::{
    AuditLogEntry, AuditLogRepository, Booking, BookingPage, BookingQuery, BookingRepository,
    ContentSection, DomainError, IdGenerator, ImageAsset, ImageRepository, RecordId, RepoResult,
    SectionKind, SectionOrder, SectionQuery, SectionRepository, SettingRepository, SiteSetting,
    UpsertOutcome, DEFAULT_SETTING_CATEGORY,
};
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;

use crate::services::{RebuildTrigger, ServiceContext, ServiceContextBuilder, ServiceResult};
use crate::ServiceError;

pub const TEST_STORAGE_URL: &str = "https://images.example.test";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn unavailable() -> DomainError {
    DomainError::DatabaseError("datastore unavailable".to_string())
}

// ============================================================================
// Sections
// ============================================================================

#[derive(Default)]
pub struct InMemorySectionRepository {
    rows: Mutex<Vec<ContentSection>>,
    fail_reads: AtomicBool,
    writes: AtomicUsize,
}

impl InMemorySectionRepository {
    /// Insert a row directly, bypassing the write counter
    pub fn seed(&self, section: ContentSection) {
        lock(&self.rows).push(section);
    }

    pub fn get(&self, id: RecordId) -> Option<ContentSection> {
        lock(&self.rows).iter().find(|s| s.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Successful writes since construction
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn wrote(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SectionRepository for InMemorySectionRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ContentSection>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.get(id))
    }

    async fn find(&self, query: &SectionQuery) -> RepoResult<Vec<ContentSection>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable());
        }

        let mut rows: Vec<ContentSection> = lock(&self.rows)
            .iter()
            .filter(|s| query.matches(s))
            .cloned()
            .collect();

        match query.order {
            SectionOrder::DisplayOrder => {
                rows.sort_by(|a, b| (a.display_order, a.created_at).cmp(&(b.display_order, b.created_at)));
            }
            SectionOrder::LatestPublished => rows.sort_by(|a, b| b.published_at.cmp(&a.published_at)),
            SectionOrder::Recency => rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        }
        if let Some(limit) = query.limit {
            rows.truncate(usize::try_from(limit).unwrap_or(0));
        }
        Ok(rows)
    }

    async fn create(&self, section: &ContentSection) -> RepoResult<()> {
        lock(&self.rows).push(section.clone());
        self.wrote();
        Ok(())
    }

    async fn update(&self, section: &ContentSection) -> RepoResult<()> {
        let mut rows = lock(&self.rows);
        let row = rows
            .iter_mut()
            .find(|s| s.id == section.id)
            .ok_or(DomainError::SectionNotFound(section.id))?;
        *row = section.clone();
        self.wrote();
        Ok(())
    }

    async fn delete(&self, kind: SectionKind, id: RecordId) -> RepoResult<Option<ContentSection>> {
        let mut rows = lock(&self.rows);
        let Some(index) = rows.iter().position(|s| s.id == id && s.kind == kind) else {
            return Ok(None);
        };
        self.wrote();
        Ok(Some(rows.remove(index)))
    }

    async fn reorder(&self, kind: SectionKind, orders: &[(RecordId, i32)]) -> RepoResult<()> {
        let mut rows = lock(&self.rows);
        // Check everything before touching anything
        if let Some((missing, _)) = orders
            .iter()
            .find(|(id, _)| !rows.iter().any(|s| s.id == *id && s.kind == kind))
        {
            return Err(DomainError::SectionNotFound(*missing));
        }

        let now = Utc::now();
        for (id, order) in orders {
            if let Some(row) = rows.iter_mut().find(|s| s.id == *id) {
                row.display_order = *order;
                row.updated_at = now;
            }
        }
        self.wrote();
        Ok(())
    }
}

// ============================================================================
// Audit log
// ============================================================================

#[derive(Default)]
pub struct InMemoryAuditLogRepository {
    entries: Mutex<Vec<AuditLogEntry>>,
    failing: AtomicBool,
}

impl InMemoryAuditLogRepository {
    pub fn entries(&self) -> Vec<AuditLogEntry> {
        lock(&self.entries).clone()
    }

    /// Make every append fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        lock(&self.entries).push(entry.clone());
        Ok(())
    }

    async fn recent(&self, limit: i64) -> RepoResult<Vec<AuditLogEntry>> {
        let entries = lock(&self.entries);
        Ok(entries
            .iter()
            .rev()
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }
}

// ============================================================================
// Settings
// ============================================================================

#[derive(Default)]
pub struct InMemorySettingRepository {
    rows: Mutex<Vec<SiteSetting>>,
    writes: AtomicUsize,
}

impl InMemorySettingRepository {
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingRepository for InMemorySettingRepository {
    async fn find_by_key(&self, key: &str) -> RepoResult<Option<SiteSetting>> {
        Ok(lock(&self.rows).iter().find(|s| s.key == key).cloned())
    }

    async fn find_by_category(&self, category: Option<&str>) -> RepoResult<Vec<SiteSetting>> {
        let mut rows: Vec<SiteSetting> = lock(&self.rows)
            .iter()
            .filter(|s| category.is_none_or(|c| s.category == c))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(rows)
    }

    async fn upsert(
        &self,
        id: RecordId,
        key: &str,
        category: Option<&str>,
        value: &JsonValue,
    ) -> RepoResult<(SiteSetting, UpsertOutcome)> {
        let mut rows = lock(&self.rows);
        if let Some(row) = rows.iter_mut().find(|s| s.key == key) {
            if let Some(category) = category {
                row.category = category.to_string();
            }
            row.value = value.clone();
            row.updated_at = Utc::now();
            self.writes.fetch_add(1, Ordering::SeqCst);
            return Ok((row.clone(), UpsertOutcome::Updated));
        }

        let setting = SiteSetting::new(
            id,
            key.to_string(),
            category.unwrap_or(DEFAULT_SETTING_CATEGORY).to_string(),
            value.clone(),
        );
        rows.push(setting.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok((setting, UpsertOutcome::Created))
    }
}

// ============================================================================
// Bookings
// ============================================================================

#[derive(Default)]
pub struct InMemoryBookingRepository {
    rows: Mutex<Vec<Booking>>,
    collisions: AtomicUsize,
    writes: AtomicUsize,
}

impl InMemoryBookingRepository {
    /// Reject the next `n` inserts as confirmation number collisions
    pub fn collide_next(&self, n: usize) {
        self.collisions.store(n, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<Booking> {
        lock(&self.rows).clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Booking>> {
        Ok(lock(&self.rows).iter().find(|b| b.id == id).cloned())
    }

    async fn search(&self, query: &BookingQuery) -> RepoResult<BookingPage> {
        let needle = query.search.as_deref().map(str::to_lowercase);
        let mut matched: Vec<Booking> = lock(&self.rows)
            .iter()
            .filter(|b| query.status.is_none_or(|s| b.status == s))
            .filter(|b| query.request_type.is_none_or(|t| b.request_type == t))
            .filter(|b| {
                needle.as_deref().is_none_or(|n| {
                    b.full_name.to_lowercase().contains(n)
                        || b.email.to_lowercase().contains(n)
                        || b.confirmation_number.to_lowercase().contains(n)
                })
            })
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = i64::try_from(matched.len()).unwrap_or(i64::MAX);
        let items = matched
            .into_iter()
            .skip(usize::try_from(query.offset()).unwrap_or(0))
            .take(usize::try_from(query.limit).unwrap_or(0))
            .collect();
        Ok(BookingPage { items, total })
    }

    async fn create(&self, booking: &Booking) -> RepoResult<()> {
        let pending = self.collisions.load(Ordering::SeqCst);
        if pending > 0 {
            self.collisions.store(pending - 1, Ordering::SeqCst);
            return Err(DomainError::ConfirmationNumberExists);
        }

        let mut rows = lock(&self.rows);
        if rows
            .iter()
            .any(|b| b.confirmation_number == booking.confirmation_number)
        {
            return Err(DomainError::ConfirmationNumberExists);
        }
        rows.push(booking.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn update(&self, booking: &Booking) -> RepoResult<()> {
        let mut rows = lock(&self.rows);
        let row = rows
            .iter_mut()
            .find(|b| b.id == booking.id)
            .ok_or(DomainError::BookingNotFound(booking.id))?;
        *row = booking.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> RepoResult<bool> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|b| b.id != id);
        let removed = rows.len() != before;
        if removed {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(removed)
    }
}

// ============================================================================
// Images
// ============================================================================

#[derive(Default)]
pub struct InMemoryImageRepository {
    rows: Mutex<Vec<ImageAsset>>,
    writes: AtomicUsize,
}

impl InMemoryImageRepository {
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageRepository for InMemoryImageRepository {
    async fn find_by_id(&self, id: RecordId) -> RepoResult<Option<ImageAsset>> {
        Ok(lock(&self.rows).iter().find(|i| i.id == id).cloned())
    }

    async fn list(&self, folder: Option<&str>, limit: i64) -> RepoResult<Vec<ImageAsset>> {
        let mut rows: Vec<ImageAsset> = lock(&self.rows)
            .iter()
            .filter(|i| folder.is_none_or(|f| i.folder.as_deref() == Some(f)))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(rows)
    }

    async fn create(&self, image: &ImageAsset) -> RepoResult<()> {
        let mut rows = lock(&self.rows);
        if rows.iter().any(|i| i.storage_key == image.storage_key) {
            return Err(DomainError::ImageKeyExists(image.storage_key.clone()));
        }
        rows.push(image.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> RepoResult<bool> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|i| i.id != id);
        let removed = rows.len() != before;
        if removed {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(removed)
    }
}

// ============================================================================
// Context
// ============================================================================

/// Shared handles to the fakes behind a test context
#[derive(Default, Clone)]
pub struct TestRepositories {
    pub sections: Arc<InMemorySectionRepository>,
    pub audit: Arc<InMemoryAuditLogRepository>,
    pub settings: Arc<InMemorySettingRepository>,
    pub bookings: Arc<InMemoryBookingRepository>,
    pub images: Arc<InMemoryImageRepository>,
}

impl TestRepositories {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes across every store, audit appends included
    pub fn write_count(&self) -> usize {
        self.sections.write_count()
            + self.settings.write_count()
            + self.bookings.write_count()
            + self.images.write_count()
            + self.audit.entries().len()
    }

    /// Context without a deploy hook or Redis
    ///
    /// Must be called inside a Tokio runtime; the Postgres pool is lazy and
    /// never connects unless a readiness probe runs.
    pub fn context(&self) -> ServiceResult<ServiceContext> {
        self.context_with_hook(None)
    }

    pub fn context_with_hook(&self, hook_url: Option<String>) -> ServiceResult<ServiceContext> {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/safari_test")
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let rebuild = RebuildTrigger::new(&DeployConfig {
            rebuild_hook_url: hook_url,
            timeout_secs: 2,
        })?;

        ServiceContextBuilder::new()
            .pool(pool)
            .section_repo(self.sections.clone())
            .audit_repo(self.audit.clone())
            .setting_repo(self.settings.clone())
            .booking_repo(self.bookings.clone())
            .image_repo(self.images.clone())
            .rebuild(rebuild)
            .storage(StorageConfig {
                bucket: "safari-images".to_string(),
                public_base_url: TEST_STORAGE_URL.to_string(),
            })
            .id_generator(Arc::new(IdGenerator::new(1)))
            .build()
    }
}
