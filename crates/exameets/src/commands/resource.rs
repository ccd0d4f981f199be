//! Handlers for the seven content sections.
//!
//! One handler serves them all: the section is a `ResourceKind`, the
//! operations are the slice operations, and the records are opaque
//! documents rendered generically.

use exameets_core::{ListQuery, ResourceKind, Store};

use crate::cli::{GlobalOpts, ListArgs, ResourceArgs, ResourceCommand};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    store: &Store,
    kind: ResourceKind,
    args: ResourceArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let slice = store.slice(kind);

    match args.command {
        ResourceCommand::List(list) => {
            let query = build_query(kind, &list);
            slice.list(&query).await?;

            // A remembered page can outlive the listing it came from;
            // clamp and re-fetch instead of showing an empty page.
            let mut snap = slice.snapshot();
            if let Some(requested) = query.page {
                let clamped = snap.pagination.clamp_page(requested);
                if clamped != requested {
                    let query = ListQuery {
                        page: Some(clamped),
                        ..query.clone()
                    };
                    slice.list(&query).await?;
                    snap = slice.snapshot();
                }
            }
            let out = output::render_records(&global.output, &snap.items);
            output::print_output(&out, global.quiet);
            if !global.quiet {
                let p = snap.pagination;
                eprintln!(
                    "page {} of {} ({} total)",
                    p.current_page, p.total_pages, p.total_items
                );
            }
            remember_page(kind, snap.pagination.current_page);
            Ok(())
        }

        ResourceCommand::Get { id } => {
            slice.get_one(&id).await.map_err(|e| not_found(kind, &id, e))?;

            let snap = slice.snapshot();
            if let Some(ref record) = snap.current {
                let out = output::render_record(&global.output, record);
                output::print_output(&out, global.quiet);
            }
            Ok(())
        }

        ResourceCommand::Create(payload) => {
            let cfg = config::load_config_or_default();
            config::ensure_session(store, &cfg, "create").await?;

            let payload = util::build_payload(&payload)?;
            slice.create(payload).await?;
            report_message(store, kind, "created", global.quiet);
            Ok(())
        }

        ResourceCommand::Update { id, payload } => {
            let cfg = config::load_config_or_default();
            config::ensure_session(store, &cfg, "update").await?;

            let payload = util::build_payload(&payload)?;
            slice
                .update(&id, payload)
                .await
                .map_err(|e| not_found(kind, &id, e))?;
            report_message(store, kind, "updated", global.quiet);
            Ok(())
        }

        ResourceCommand::Delete { id } => {
            let cfg = config::load_config_or_default();
            config::ensure_session(store, &cfg, "delete").await?;

            if !util::confirm(
                &format!("Delete {} '{id}'? This is permanent.", kind.route().singular),
                global.yes,
            )? {
                return Ok(());
            }
            slice
                .delete(&id)
                .await
                .map_err(|e| not_found(kind, &id, e))?;
            report_message(store, kind, "deleted", global.quiet);
            Ok(())
        }

        ResourceCommand::Latest => {
            slice.list_latest().await?;

            let snap = slice.snapshot();
            let out = output::render_records(&global.output, &snap.latest);
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a `ListQuery`, defaulting the page to the last one visited.
fn build_query(kind: ResourceKind, list: &ListArgs) -> ListQuery {
    let page = list.page.or_else(|| {
        let prefs = exameets_config::load_prefs();
        let remembered = prefs.page_for(&kind.to_string());
        (remembered > 1).then_some(remembered)
    });
    let mut query = ListQuery {
        search_keyword: list.search.clone(),
        page,
        filters: Vec::new(),
    };
    for raw in &list.filter {
        if let Ok((key, value)) = util::parse_kv(raw) {
            query = query.with_filter(key, value);
        }
    }
    query
}

/// Persist the visited page so the next invocation resumes there.
/// Best-effort: preference IO failures never fail the command.
fn remember_page(kind: ResourceKind, page: u32) {
    let mut prefs = exameets_config::load_prefs();
    prefs.remember_page(&kind.to_string(), page);
    if let Err(e) = exameets_config::save_prefs(&prefs) {
        tracing::debug!(error = %e, "could not persist page preference");
    }
}

/// Surface the slice's success message after a mutation.
fn report_message(store: &Store, kind: ResourceKind, verb: &str, quiet: bool) {
    if quiet {
        return;
    }
    let snap = store.slice(kind).snapshot();
    match snap.message {
        Some(ref message) => eprintln!("{message}"),
        None => eprintln!("{} {verb}", kind.route().singular),
    }
}

/// Re-shape a 404 into a not-found diagnostic naming the list command.
fn not_found(kind: ResourceKind, id: &str, err: exameets_core::CoreError) -> CliError {
    if err.is_not_found() {
        CliError::NotFound {
            resource: kind.route().singular.to_owned(),
            identifier: id.to_owned(),
            list_command: format!("{kind} list"),
        }
    } else {
        err.into()
    }
}
