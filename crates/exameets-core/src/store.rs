// ── Store facade ──
//
// Built once from an `ApiClient` and handed around by cheap clones.
// All slices hang off it; nothing in this crate reaches for ambient
// globals.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use strum::IntoEnumIterator;
use tracing::warn;
use url::Url;

use exameets_api::{ApiClient, Record, TransportConfig};

use crate::error::CoreError;
use crate::kind::ResourceKind;
use crate::session::SessionSlice;
use crate::slice::ResourceSlice;

/// One section of the cross-entity what's-new feed.
#[derive(Debug, Clone)]
pub struct WhatsNewSection {
    pub kind: ResourceKind,
    pub records: Vec<Record>,
}

/// Process-wide handle owning every slice.
///
/// Cloning is cheap (a single `Arc`); clones share all state.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    api: Arc<ApiClient>,
    session: SessionSlice,
    jobs: ResourceSlice,
    govt_jobs: ResourceSlice,
    exams: ResourceSlice,
    scholarships: ResourceSlice,
    admit_cards: ResourceSlice,
    admissions: ResourceSlice,
    previous_year_papers: ResourceSlice,
}

impl Store {
    /// Build a store over an existing API client.
    pub fn new(api: ApiClient) -> Self {
        let api = Arc::new(api);
        let slice = |kind| ResourceSlice::new(kind, Arc::clone(&api));
        Self {
            inner: Arc::new(StoreInner {
                session: SessionSlice::new(Arc::clone(&api)),
                jobs: slice(ResourceKind::Jobs),
                govt_jobs: slice(ResourceKind::GovtJobs),
                exams: slice(ResourceKind::Exams),
                scholarships: slice(ResourceKind::Scholarships),
                admit_cards: slice(ResourceKind::AdmitCards),
                admissions: slice(ResourceKind::Admissions),
                previous_year_papers: slice(ResourceKind::PreviousYearPapers),
                api,
            }),
        }
    }

    /// Convenience constructor: connect to a backend by base URL.
    pub fn connect(base_url: &str, transport: &TransportConfig) -> Result<Self, CoreError> {
        let base_url: Url = base_url.parse().map_err(|e: url::ParseError| {
            CoreError::ValidationFailed {
                message: format!("invalid base URL: {e}"),
            }
        })?;
        let api = ApiClient::new(base_url, transport)?;
        Ok(Self::new(api))
    }

    /// The underlying API client.
    pub fn api(&self) -> &Arc<ApiClient> {
        &self.inner.api
    }

    /// The session slice.
    pub fn session(&self) -> &SessionSlice {
        &self.inner.session
    }

    /// The slice owning `kind`.
    pub fn slice(&self, kind: ResourceKind) -> &ResourceSlice {
        match kind {
            ResourceKind::Jobs => &self.inner.jobs,
            ResourceKind::GovtJobs => &self.inner.govt_jobs,
            ResourceKind::Exams => &self.inner.exams,
            ResourceKind::Scholarships => &self.inner.scholarships,
            ResourceKind::AdmitCards => &self.inner.admit_cards,
            ResourceKind::Admissions => &self.inner.admissions,
            ResourceKind::PreviousYearPapers => &self.inner.previous_year_papers,
        }
    }

    /// Cross-entity what's-new aggregation.
    ///
    /// Fans `list_latest()` out across all seven slices concurrently,
    /// then assembles one section per kind with at most `per_section`
    /// records, newest posting first. A section whose fetch failed is
    /// omitted rather than failing the whole feed; the failure is still
    /// recorded in that slice's `error` slot.
    pub async fn whats_new(&self, per_section: usize) -> Vec<WhatsNewSection> {
        let inner = &self.inner;
        let results = tokio::join!(
            inner.jobs.list_latest(),
            inner.govt_jobs.list_latest(),
            inner.exams.list_latest(),
            inner.scholarships.list_latest(),
            inner.admit_cards.list_latest(),
            inner.admissions.list_latest(),
            inner.previous_year_papers.list_latest(),
        );
        let outcomes = [
            (ResourceKind::Jobs, results.0),
            (ResourceKind::GovtJobs, results.1),
            (ResourceKind::Exams, results.2),
            (ResourceKind::Scholarships, results.3),
            (ResourceKind::AdmitCards, results.4),
            (ResourceKind::Admissions, results.5),
            (ResourceKind::PreviousYearPapers, results.6),
        ];

        let mut sections = Vec::new();
        for (kind, result) in outcomes {
            if let Err(e) = result {
                warn!(%kind, error = %e, "latest fetch failed; section omitted");
                continue;
            }
            let mut records = self.slice(kind).snapshot().latest.clone();
            records.sort_by_key(|r| std::cmp::Reverse(posted_at(r)));
            records.truncate(per_section);
            sections.push(WhatsNewSection { kind, records });
        }
        sections
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("slices", &ResourceKind::iter().count())
            .finish_non_exhaustive()
    }
}

/// Sort key for the feed. Records without a parseable posting date sort
/// last within their section.
fn posted_at(record: &Record) -> DateTime<Utc> {
    record.created_at().unwrap_or(DateTime::<Utc>::MIN_UTC)
}
