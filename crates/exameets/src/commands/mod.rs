//! Command dispatch: bridges CLI args -> store operations -> output.

pub mod auth;
pub mod config_cmd;
pub mod profile;
pub mod resource;
pub mod util;
pub mod whats_new;

use exameets_core::{ResourceKind, Store};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, store: &Store, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Jobs(args) => resource::handle(store, ResourceKind::Jobs, args, global).await,
        Command::GovtJobs(args) => {
            resource::handle(store, ResourceKind::GovtJobs, args, global).await
        }
        Command::Exams(args) => resource::handle(store, ResourceKind::Exams, args, global).await,
        Command::Scholarships(args) => {
            resource::handle(store, ResourceKind::Scholarships, args, global).await
        }
        Command::AdmitCards(args) => {
            resource::handle(store, ResourceKind::AdmitCards, args, global).await
        }
        Command::Admissions(args) => {
            resource::handle(store, ResourceKind::Admissions, args, global).await
        }
        Command::PreviousYearPapers(args) => {
            resource::handle(store, ResourceKind::PreviousYearPapers, args, global).await
        }
        Command::WhatsNew(args) => whats_new::handle(store, args, global).await,
        Command::Auth(args) => auth::handle(store, args, global).await,
        Command::Profile(args) => profile::handle(store, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
