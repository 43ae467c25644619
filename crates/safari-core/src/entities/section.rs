//! Content sections and their draft/published lifecycle
//!
//! A section is one editable region of a public page. All section kinds share
//! one shape; the kind decides whether the public site shows a single
//! "latest published wins" row or an ordered list of active rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::RecordId;

/// Lifecycle status of a section row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PublishStatus {
    #[default]
    Draft,
    Published,
}

impl PublishStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
        }
    }

    pub fn from_db(value: &str) -> Self {
        if value.eq_ignore_ascii_case("PUBLISHED") {
            Self::Published
        } else {
            Self::Draft
        }
    }
}

/// Which view of a section a read request receives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Editors: every row regardless of status or visibility
    Cms,
    /// Visitors: published rows only
    #[default]
    Public,
}

impl ReadMode {
    /// `"cms"` selects the editor view; anything else, including absence, is public
    pub fn from_param(mode: Option<&str>) -> Self {
        match mode {
            Some(m) if m.eq_ignore_ascii_case("cms") => Self::Cms,
            _ => Self::Public,
        }
    }

    pub fn is_cms(self) -> bool {
        matches!(self, Self::Cms)
    }
}

/// How many rows of a kind the public site renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Latest published row wins
    Single,
    /// Ordered list of published, active rows
    Multiple,
}

/// The editable section kinds of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Hero,
    Cta,
    About,
    ContactInfo,
    Banner,
    Gallery,
    Faq,
    Step,
    Testimonial,
    Feature,
    Stat,
    Partner,
    TeamMember,
    Highlight,
}

impl SectionKind {
    pub const ALL: [SectionKind; 14] = [
        Self::Hero,
        Self::Cta,
        Self::About,
        Self::ContactInfo,
        Self::Banner,
        Self::Gallery,
        Self::Faq,
        Self::Step,
        Self::Testimonial,
        Self::Feature,
        Self::Stat,
        Self::Partner,
        Self::TeamMember,
        Self::Highlight,
    ];

    /// Tag stored in the `kind` column, used in URLs and as the audit entity type
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Cta => "cta",
            Self::About => "about",
            Self::ContactInfo => "contact-info",
            Self::Banner => "banner",
            Self::Gallery => "gallery",
            Self::Faq => "faq",
            Self::Step => "step",
            Self::Testimonial => "testimonial",
            Self::Feature => "feature",
            Self::Stat => "stat",
            Self::Partner => "partner",
            Self::TeamMember => "team-member",
            Self::Highlight => "highlight",
        }
    }

    pub fn cardinality(self) -> Cardinality {
        match self {
            Self::Hero | Self::Cta | Self::About | Self::ContactInfo | Self::Banner => {
                Cardinality::Single
            }
            _ => Cardinality::Multiple,
        }
    }

    pub fn is_single(self) -> bool {
        self.cardinality() == Cardinality::Single
    }

    /// Key wrapping the payload in read responses: `{ <key>: ... }`
    pub fn response_key(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Cta => "cta",
            Self::About => "about",
            Self::ContactInfo => "contactInfo",
            Self::Banner => "banner",
            Self::Gallery => "galleryEntries",
            Self::Faq => "faqs",
            Self::Step => "steps",
            Self::Testimonial => "testimonials",
            Self::Feature => "features",
            Self::Stat => "stats",
            Self::Partner => "partners",
            Self::TeamMember => "teamMembers",
            Self::Highlight => "highlights",
        }
    }

    /// Public pages that render this kind and go stale when it changes
    pub fn page_paths(self) -> &'static [&'static str] {
        match self {
            Self::Hero | Self::Cta | Self::Banner | Self::Stat | Self::Partner => &["/"],
            Self::Testimonial | Self::Highlight | Self::Feature => &["/", "/about"],
            Self::About | Self::TeamMember => &["/about"],
            Self::ContactInfo => &["/contact", "/"],
            Self::Gallery => &["/gallery", "/"],
            Self::Faq => &["/faq", "/contact"],
            Self::Step => &["/how-it-works", "/"],
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::InvalidSectionKind(s.to_string()))
    }
}

/// Row ordering for a section read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionOrder {
    /// `display_order` ascending, ties by creation order
    DisplayOrder,
    /// `published_at` descending
    LatestPublished,
    /// `updated_at` descending
    Recency,
}

/// Filter/order resolved from a kind and a read mode.
///
/// The filters are part of the read query itself, so a draft row can never
/// be observed through the public view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionQuery {
    pub kind: SectionKind,
    pub published_only: bool,
    pub active_only: bool,
    pub order: SectionOrder,
    pub limit: Option<i64>,
}

impl SectionQuery {
    pub fn resolve(kind: SectionKind, mode: ReadMode) -> Self {
        match (mode, kind.cardinality()) {
            (ReadMode::Cms, _) => Self {
                kind,
                published_only: false,
                active_only: false,
                order: SectionOrder::Recency,
                limit: None,
            },
            (ReadMode::Public, Cardinality::Single) => Self {
                kind,
                published_only: true,
                active_only: false,
                order: SectionOrder::LatestPublished,
                limit: Some(1),
            },
            (ReadMode::Public, Cardinality::Multiple) => Self {
                kind,
                published_only: true,
                active_only: true,
                order: SectionOrder::DisplayOrder,
                limit: None,
            },
        }
    }

    /// In-memory equivalent of the SQL predicate
    pub fn matches(&self, section: &ContentSection) -> bool {
        section.kind == self.kind
            && (!self.published_only || section.status == PublishStatus::Published)
            && (!self.active_only || section.active)
    }
}

/// Editable content section
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSection {
    pub id: RecordId,
    pub kind: SectionKind,
    pub status: PublishStatus,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub link_label: Option<String>,
    pub link_url: Option<String>,
    /// Ordered sub-items (FAQ entries of a block, stats of a strip, ...)
    pub items: JsonValue,
    pub metadata: JsonValue,
    pub display_order: i32,
    pub active: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field updates for a section; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionPatch {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub link_label: Option<String>,
    pub link_url: Option<String>,
    pub items: Option<JsonValue>,
    pub metadata: Option<JsonValue>,
    pub display_order: Option<i32>,
    pub active: Option<bool>,
}

impl ContentSection {
    /// New draft row: `display_order` 0 and `active` unless the patch says otherwise
    pub fn new(id: RecordId, kind: SectionKind, fields: SectionPatch, now: DateTime<Utc>) -> Self {
        let mut section = Self {
            id,
            kind,
            status: PublishStatus::Draft,
            title: None,
            subtitle: None,
            description: None,
            image: None,
            images: Vec::new(),
            link_label: None,
            link_url: None,
            items: JsonValue::Array(Vec::new()),
            metadata: JsonValue::Object(serde_json::Map::new()),
            display_order: 0,
            active: true,
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        section.apply(fields);
        section
    }

    /// Copy every present field of the patch onto the row
    pub fn apply(&mut self, patch: SectionPatch) {
        if let Some(v) = patch.title {
            self.title = Some(v);
        }
        if let Some(v) = patch.subtitle {
            self.subtitle = Some(v);
        }
        if let Some(v) = patch.description {
            self.description = Some(v);
        }
        if let Some(v) = patch.image {
            self.image = Some(v);
        }
        if let Some(v) = patch.images {
            self.images = v;
        }
        if let Some(v) = patch.link_label {
            self.link_label = Some(v);
        }
        if let Some(v) = patch.link_url {
            self.link_url = Some(v);
        }
        if let Some(v) = patch.items {
            self.items = v;
        }
        if let Some(v) = patch.metadata {
            self.metadata = v;
        }
        if let Some(v) = patch.display_order {
            self.display_order = v;
        }
        if let Some(v) = patch.active {
            self.active = v;
        }
    }

    /// Apply the status transition of a write.
    ///
    /// Publishing stamps `published_at`; reverting to draft keeps the last
    /// publish timestamp for history.
    pub fn set_publication(&mut self, publish: bool, now: DateTime<Utc>) {
        self.updated_at = now;
        if publish {
            self.status = PublishStatus::Published;
            self.published_at = Some(now);
        } else {
            self.status = PublishStatus::Draft;
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PublishStatus::Published
    }

    /// Whether the public view may return this row
    pub fn is_publicly_visible(&self) -> bool {
        SectionQuery::resolve(self.kind, ReadMode::Public).matches(self)
    }

    /// Published rows carry a `published_at` no later than `updated_at`
    pub fn is_consistent(&self) -> bool {
        match (self.status, self.published_at) {
            (PublishStatus::Published, Some(at)) => at <= self.updated_at,
            (PublishStatus::Published, None) => false,
            (PublishStatus::Draft, _) => true,
        }
    }
}
