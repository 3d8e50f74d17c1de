use crate::api::LeaveStatus;
use leptos::*;

pub fn status_label(status: &LeaveStatus) -> String {
    match status {
        LeaveStatus::Pending => "Pending".into(),
        LeaveStatus::Approved => "Approved".into(),
        LeaveStatus::Rejected => "Rejected".into(),
        LeaveStatus::Unknown => "-".into(),
        LeaveStatus::Other(value) => {
            let mut chars = value.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => "-".into(),
            }
        }
    }
}

fn badge_class(status: &LeaveStatus) -> &'static str {
    match status {
        LeaveStatus::Pending => "bg-status-warning-bg text-status-warning-text",
        LeaveStatus::Approved => "bg-status-success-bg text-status-success-text",
        LeaveStatus::Rejected => "bg-status-error-bg text-status-error-text",
        LeaveStatus::Other(_) | LeaveStatus::Unknown => "bg-surface-muted text-fg-muted",
    }
}

#[component]
pub fn StatusBadge(status: LeaveStatus) -> impl IntoView {
    let class = format!(
        "inline-flex items-center rounded-full px-2.5 py-0.5 text-xs font-semibold {}",
        badge_class(&status)
    );
    view! { <span class=class>{status_label(&status)}</span> }
}
