// ── Generic resource slice ──
//
// One slice per content resource. Owns the Resource Container (items,
// current, latest, pagination, status, error, message) behind a `watch`
// channel: mutations are synchronous `send_modify` applications of
// completed async results, subscribers get push-based change
// notification, and reads are cheap `Arc` clones.
//
// Overlapping requests are fenced with a monotonically increasing
// sequence token: a response that settles after a newer request began is
// dropped entirely, so a slow stale `list()` can never overwrite fresher
// state. The newest completed request always wins.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};
use tokio::sync::watch;
use tracing::debug;

use exameets_api::{ApiClient, ListQuery, Pagination, Record};

use crate::error::CoreError;
use crate::kind::ResourceKind;

/// Request lifecycle status of a slice.
///
/// `Loading` implies no stale `error` is displayed -- entering it clears
/// the error slot (but not `message`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SliceStatus {
    #[default]
    Idle,
    Loading,
    Error,
}

/// The Resource Container every slice conforms to.
///
/// `items` and `current` are independently fetched and independently
/// clearable; `latest` is the separate bounded container feeding the
/// cross-entity what's-new view.
#[derive(Debug, Clone, Default)]
pub struct ResourceState {
    pub items: Vec<Record>,
    pub current: Option<Record>,
    pub latest: Vec<Record>,
    pub pagination: Pagination,
    pub status: SliceStatus,
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ResourceState {
    pub fn is_loading(&self) -> bool {
        self.status == SliceStatus::Loading
    }
}

/// Reactive state container for a single content resource.
pub struct ResourceSlice {
    kind: ResourceKind,
    api: Arc<ApiClient>,
    state: watch::Sender<Arc<ResourceState>>,
    /// Request fence. Bumped when an operation starts; a settling
    /// operation whose token no longer matches applies nothing.
    seq: AtomicU64,
}

impl ResourceSlice {
    pub(crate) fn new(kind: ResourceKind, api: Arc<ApiClient>) -> Self {
        let (state, _) = watch::channel(Arc::new(ResourceState::default()));
        Self {
            kind,
            api,
            state,
            seq: AtomicU64::new(0),
        }
    }

    /// Which resource this slice owns.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Current state snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<ResourceState> {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Arc<ResourceState>> {
        self.state.subscribe()
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Fetch one page of the listing, replacing `items` and `pagination`
    /// wholesale (not merged or appended).
    pub async fn list(&self, query: &ListQuery) -> Result<(), CoreError> {
        let token = self.begin();

        match self.api.list(self.kind.route(), query).await {
            Ok(page) => {
                self.settle(token, |s| {
                    s.items = page.items.clone();
                    s.pagination = page.pagination;
                });
                Ok(())
            }
            Err(e) => Err(self.fail(token, e)),
        }
    }

    /// Fetch a single record, replacing `current` wholesale.
    pub async fn get_one(&self, id: &str) -> Result<(), CoreError> {
        let token = self.begin();

        match self.api.get_one(self.kind.route(), id).await {
            Ok(record) => {
                self.settle(token, |s| s.current = Some(record.clone()));
                Ok(())
            }
            Err(e) => Err(self.fail(token, e)),
        }
    }

    /// Clear `current` (detail-view unmount). Leaves `items` untouched.
    ///
    /// Also bumps the fence so an in-flight `get_one` cannot resurrect
    /// the cleared record after the reset.
    pub fn reset_current(&self) {
        self.seq.fetch_add(1, Ordering::SeqCst);
        self.apply(|s| s.current = None);
    }

    /// Create a record. On success the new record is prepended to
    /// `items` (newest first) rather than re-fetching the list.
    ///
    /// Unlike [`update`](Self::update), there is no local fallback when
    /// the backend acknowledges without echoing the record: the id is
    /// backend-assigned, so a synthesized entry could never be updated
    /// or deleted. Only `message` is set; the next `list()` picks the
    /// record up.
    pub async fn create(&self, payload: Map<String, Value>) -> Result<(), CoreError> {
        let token = self.begin();

        match self.api.create(self.kind.route(), payload).await {
            Ok(outcome) => {
                self.settle(token, |s| {
                    if let Some(ref record) = outcome.record {
                        s.items.insert(0, record.clone());
                    }
                    s.message = outcome.message.clone();
                });
                Ok(())
            }
            Err(e) => Err(self.fail(token, e)),
        }
    }

    /// Update a record in place. The matching entry in `items` keeps its
    /// position; `current` is replaced too when it is the same record.
    /// An id absent from local state is a silent no-op.
    pub async fn update(&self, id: &str, payload: Map<String, Value>) -> Result<(), CoreError> {
        let token = self.begin();

        match self.api.update(self.kind.route(), id, payload.clone()).await {
            Ok(outcome) => {
                self.settle(token, |s| {
                    let updated = outcome
                        .record
                        .clone()
                        .unwrap_or_else(|| merged_record(s, id, &payload));
                    if let Some(entry) = s.items.iter_mut().find(|r| r.id == id) {
                        *entry = updated.clone();
                    }
                    if s.current.as_ref().is_some_and(|c| c.id == id) {
                        s.current = Some(updated);
                    }
                    s.message = outcome.message.clone();
                });
                Ok(())
            }
            Err(e) => Err(self.fail(token, e)),
        }
    }

    /// Delete a record, removing it from `items` by id. `current` is not
    /// touched. An id absent from `items` is a silent no-op -- the
    /// request still ran, so `message` is set and no error is raised.
    pub async fn delete(&self, id: &str) -> Result<(), CoreError> {
        let token = self.begin();

        match self.api.delete_one(self.kind.route(), id).await {
            Ok(message) => {
                self.settle(token, |s| {
                    s.items.retain(|r| r.id != id);
                    s.message = message.clone();
                });
                Ok(())
            }
            Err(e) => Err(self.fail(token, e)),
        }
    }

    /// Populate the bounded `latest` container. Independent from `items`.
    pub async fn list_latest(&self) -> Result<(), CoreError> {
        let token = self.begin();

        match self.api.latest(self.kind.route()).await {
            Ok(records) => {
                self.settle(token, |s| s.latest = records.clone());
                Ok(())
            }
            Err(e) => Err(self.fail(token, e)),
        }
    }

    /// Acknowledge the stored error (UI dismissed the notification).
    pub fn clear_error(&self) {
        self.apply(|s| {
            s.error = None;
            if s.status == SliceStatus::Error {
                s.status = SliceStatus::Idle;
            }
        });
    }

    /// Acknowledge the stored success message.
    pub fn clear_message(&self) {
        self.apply(|s| s.message = None);
    }

    // ── Lifecycle plumbing ───────────────────────────────────────────

    /// Start an operation: bump the fence, set `Loading`, clear `error`.
    fn begin(&self) -> u64 {
        let token = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.apply(|s| {
            s.status = SliceStatus::Loading;
            s.error = None;
        });
        token
    }

    /// Apply a successful result, unless a newer request has started.
    fn settle(&self, token: u64, f: impl Fn(&mut ResourceState)) {
        if self.seq.load(Ordering::SeqCst) != token {
            debug!(kind = %self.kind, "stale response dropped");
            return;
        }
        self.apply(|s| {
            f(s);
            s.status = SliceStatus::Idle;
        });
    }

    /// Record a failure, leaving prior data untouched. Stale failures
    /// are dropped like stale successes.
    fn fail(&self, token: u64, err: exameets_api::Error) -> CoreError {
        let core_err = CoreError::from(err);
        if self.seq.load(Ordering::SeqCst) == token {
            let message = core_err.display_message();
            self.apply(|s| {
                s.status = SliceStatus::Error;
                s.error = Some(message.clone());
            });
        } else {
            debug!(kind = %self.kind, "stale failure dropped");
        }
        core_err
    }

    /// Rebuild the snapshot and broadcast to subscribers.
    fn apply(&self, f: impl Fn(&mut ResourceState)) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.state.send_modify(|snap| {
            let mut next = (**snap).clone();
            f(&mut next);
            *snap = Arc::new(next);
        });
    }
}

/// Fallback for backends that acknowledge an update without echoing the
/// record: patch the locally known copy with the submitted fields.
fn merged_record(state: &ResourceState, id: &str, payload: &Map<String, Value>) -> Record {
    let mut record = state
        .items
        .iter()
        .find(|r| r.id == id)
        .or(state.current.as_ref())
        .cloned()
        .unwrap_or_else(|| Record::new(id, Map::new()));
    for (key, value) in payload {
        record.fields.insert(key.clone(), value.clone());
    }
    record
}
