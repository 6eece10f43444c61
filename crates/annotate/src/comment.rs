use crate::config::TimeMode;
use crate::types::OwnerInfo;
use chrono::{DateTime, SecondsFormat, Utc};

/// Render the comment text for an owner, without the `#` marker.
///
/// ```text
/// relative  kube-controller-manager /status (2h15m ago, update)
/// absolute  kubectl-client-side-apply (2026-02-07T12:00:00Z)
/// hide      helm (apply)
/// ```
#[must_use]
pub fn format_comment(
    owner: &OwnerInfo,
    now: DateTime<Utc>,
    time_mode: TimeMode,
    show_operation: bool,
) -> String {
    let mut text = owner.manager.clone();
    if let Some(subresource) = owner.subresource.as_deref().filter(|s| !s.is_empty()) {
        text.push_str(" /");
        text.push_str(subresource);
    }

    let mut details = Vec::with_capacity(2);
    if let Some(time) = owner.time {
        match time_mode {
            TimeMode::Relative => details.push(format_relative(now, time)),
            TimeMode::Absolute => details.push(time.to_rfc3339_opts(SecondsFormat::Secs, true)),
            TimeMode::Hide => {}
        }
    }
    if show_operation {
        if let Some(operation) = owner.operation.as_deref().filter(|op| !op.is_empty()) {
            details.push(operation.to_lowercase());
        }
    }

    if !details.is_empty() {
        text.push_str(" (");
        text.push_str(&details.join(", "));
        text.push(')');
    }
    text
}

/// Compact age of `then` as seen from `now`, e.g. `45s ago`, `2h15m ago`,
/// `3mo ago`. Timestamps in the future read `just now`.
#[must_use]
pub fn format_relative(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    if elapsed < chrono::Duration::zero() {
        return "just now".to_string();
    }

    let seconds = elapsed.num_seconds();
    if seconds < 60 {
        return format!("{seconds}s ago");
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return match seconds % 60 {
            0 => format!("{minutes}m ago"),
            rest => format!("{minutes}m{rest}s ago"),
        };
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return match minutes % 60 {
            0 => format!("{hours}h ago"),
            rest => format!("{hours}h{rest}m ago"),
        };
    }

    let days = hours / 24;
    match days {
        0..=29 => format!("{days}d ago"),
        30..=364 => format!("{}mo ago", days / 30),
        _ => format!("{}y ago", days / 365),
    }
}
