//! Remark inputs and the locally composed fallback remark

use std::cmp::Ordering;

use daysheet_domain::constants::{MAX_RAW_REMARK_LENGTH, MAX_REMARK_COMMITS, NO_ACTIVITY_REMARK};
use daysheet_domain::utils::text::truncate;
use daysheet_domain::{ActivityKind, ActivityRecord, ActivitySource, RemarkInput};

/// Messages describing a day's GitHub activity.
///
/// Commits come first in commit order, followed by pull request and
/// branch/tag summaries. Records without a timestamp keep their canonical
/// position after timed ones.
pub fn commit_messages(github: &[ActivityRecord]) -> Vec<String> {
    let mut records: Vec<&ActivityRecord> = github
        .iter()
        .filter(|r| r.source == ActivitySource::Github)
        .filter(|r| !r.title.trim().is_empty())
        .collect();

    records.sort_by(|a, b| {
        let group = |r: &ActivityRecord| u8::from(r.kind != ActivityKind::Commit);
        group(a).cmp(&group(b)).then_with(|| match (a.updated_at, b.updated_at) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
    });

    records.into_iter().map(|r| r.title.trim().to_string()).collect()
}

/// Compose a remark without a language model.
///
/// Used when the summarizer is disabled or fails. An empty input yields the
/// fixed no-activity remark.
pub fn compose_fallback_remark(input: &RemarkInput) -> String {
    if input.is_empty() {
        return NO_ACTIVITY_REMARK.to_string();
    }

    let mut parts = Vec::new();
    if let Some(task) = &input.task {
        let verb = if task.is_continued() { "Continued work on" } else { "Worked on" };
        let mut line = format!("{verb} {}: {}", task.key, task.title);
        if let Some(status) = task.status.as_deref().filter(|s| !s.trim().is_empty()) {
            line.push_str(&format!(" ({})", status.trim()));
        }
        parts.push(line);
    }

    if !input.commit_messages.is_empty() {
        let shown: Vec<&str> =
            input.commit_messages.iter().take(MAX_REMARK_COMMITS).map(String::as_str).collect();
        let mut line = format!("Commits: {}", shown.join("; "));
        let hidden = input.commit_messages.len().saturating_sub(MAX_REMARK_COMMITS);
        if hidden > 0 {
            line.push_str(&format!(" (+{hidden} more)"));
        }
        parts.push(line);
    }

    truncate(&format!("{}.", parts.join(". ")), MAX_RAW_REMARK_LENGTH)
}

/// Build the user prompt sent to a chat-completions model.
pub fn build_prompt(input: &RemarkInput) -> String {
    let task = match &input.task {
        Some(task) => {
            let mut text = format!("{} - {}", task.key, task.title);
            if let Some(status) = &task.status {
                text.push_str(&format!("\nStatus: {status}"));
            }
            if let Some(description) = &task.description {
                text.push_str(&format!("\nDescription: {}", truncate(description, 500)));
            }
            if let Some(origin) = task.continued_from {
                text.push_str(&format!("\n(Carried over from {origin}; no new updates today.)"));
            }
            text
        }
        None => "No Jira task recorded.".to_string(),
    };

    let commits = if input.commit_messages.is_empty() {
        "No GitHub activity recorded.".to_string()
    } else {
        input
            .commit_messages
            .iter()
            .take(MAX_REMARK_COMMITS)
            .map(|m| format!("- {m}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "Create a concise daily timesheet summary for the following activities on {}.\n\n\
         Jira Task:\n{task}\n\n\
         GitHub Activity:\n{commits}\n\n\
         Format the output as a single paragraph describing the work done.",
        input.date
    )
}
