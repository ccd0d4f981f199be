//! Client-side state layer for the Exameets portal.
//!
//! Sits between a consuming interface (CLI, TUI, anything that can poll
//! or subscribe) and the `exameets-api` HTTP client. Each of the seven
//! content resources gets a [`ResourceSlice`]: a reactive container
//! holding the fetched records, the selected record, the latest-postings
//! window, pagination, and loading/error bookkeeping. A [`SessionSlice`]
//! owns the authenticated principal, and [`guard::protect`] turns its
//! state into a route decision. The [`Store`] facade ties them together
//! over one shared client.
//!
//! Mutations are synchronous applications of completed async results:
//! the only suspension points are the network calls themselves, and the
//! newest completed request always wins (stale responses are fenced out).

pub mod error;
pub mod guard;
pub mod kind;
pub mod session;
pub mod slice;
pub mod store;

pub use error::CoreError;
pub use guard::{LOGIN_PATH, RouteDecision, protect};
pub use kind::ResourceKind;
pub use session::{SessionPhase, SessionSlice, SessionState};
pub use slice::{ResourceSlice, ResourceState, SliceStatus};
pub use store::{Store, WhatsNewSection};

pub use exameets_api::{
    ApiClient, ListQuery, LoginCredentials, Pagination, Record, RegisterPayload, TransportConfig,
};
