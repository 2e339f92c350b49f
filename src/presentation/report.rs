// End-of-run summary
use crate::application::publish_service::{PublishOutcome, PublishStatus};

pub fn format_outcome(outcome: &PublishOutcome) -> String {
    match &outcome.status {
        PublishStatus::Delivered { sinks } if sinks.is_empty() => {
            format!("ok      {} ({})", outcome.title, outcome.origin)
        }
        PublishStatus::Delivered { sinks } => {
            format!("ok      {} ({}) -> {}", outcome.title, outcome.origin, sinks.join(", "))
        }
        PublishStatus::Rejected(e) => {
            format!("invalid {} ({}): {}", outcome.title, outcome.origin, e)
        }
        PublishStatus::SlugConflict { slug, first_origin } => format!(
            "invalid {} ({}): output name {:?} is already used by {}",
            outcome.title, outcome.origin, slug, first_origin
        ),
        PublishStatus::SinkFailed {
            delivered,
            failures,
        } => {
            let reasons: Vec<String> = failures
                .iter()
                .map(|(sink, error)| format!("{}: {}", sink, error))
                .collect();
            let mut line = format!("failed  {} ({}): {}", outcome.title, outcome.origin, reasons.join("; "));
            if !delivered.is_empty() {
                line.push_str(&format!(" [still delivered to {}]", delivered.join(", ")));
            }
            line
        }
    }
}

/// Prints one line per dashboard and returns how many failed.
pub fn print_report(outcomes: &[PublishOutcome]) -> usize {
    for outcome in outcomes {
        println!("{}", format_outcome(outcome));
    }

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    println!("{} dashboards, {} failed", outcomes.len(), failed);
    failed
}
