//! Cross-section what's-new feed.

use owo_colors::OwoColorize;
use exameets_core::Store;

use crate::cli::{GlobalOpts, OutputFormat, WhatsNewArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(store: &Store, args: WhatsNewArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let sections = store.whats_new(args.limit).await;

    // Structured formats get the whole feed as one document.
    let feed: Vec<serde_json::Value> = sections
        .iter()
        .map(|s| {
            serde_json::json!({
                "section": s.kind.to_string(),
                "records": s.records,
            })
        })
        .collect();
    if let Some(out) = output::render_structured(&global.output, &feed) {
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let color = output::should_color(&global.color);
    for section in &sections {
        if section.records.is_empty() {
            continue;
        }
        if !global.quiet {
            let title = section.kind.title();
            if color {
                println!("{}", title.bold().underline());
            } else {
                println!("{title}");
            }
        }
        for record in &section.records {
            let posted = record
                .created_at()
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            match global.output {
                OutputFormat::Plain => println!("{}", record.id),
                _ => println!("  {posted}  {}  ({})", record.display_title(), record.id),
            }
        }
        if !global.quiet {
            println!();
        }
    }
    Ok(())
}
