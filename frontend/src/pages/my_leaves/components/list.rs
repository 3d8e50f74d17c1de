use crate::components::{empty_state::EmptyState, layout::LoadingSpinner};
use crate::pages::my_leaves::{
    components::status_badge::StatusBadge,
    types::{EnrichedLeave, LeaveListSnapshot},
    utils::{display_date, display_day_count},
};
use leptos::*;
use std::rc::Rc;

const HEADERS: [&str; 9] = [
    "Leave Type",
    "Apply Date",
    "From",
    "To",
    "Duration",
    "Status",
    "Reason",
    "Approved By",
    "Action",
];

fn leave_row(
    leave: Rc<EnrichedLeave>,
    snapshot: Signal<LeaveListSnapshot>,
    on_select: Callback<Rc<EnrichedLeave>>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let id = leave.id().to_string();
    let id_for_delete = id.clone();
    let deleting = move || snapshot.with(|s| s.is_deleting(&id));
    let record = &leave.record;
    let is_pending = record.status.is_pending();
    let apply_date = display_date(record.applied_at.map(|ts| ts.date_naive()));
    let from = display_date(record.date_from);
    let to = display_date(record.date_to);
    let days = display_day_count(record.day_count());
    let reason = record.reason.clone().unwrap_or_else(|| "-".into());
    let leave_type = record.leave_type.clone();
    let status = record.status.clone();
    let approver = leave.approver_display.clone();
    let selected = Rc::clone(&leave);

    view! {
        <tr
            class="hover:bg-surface-muted cursor-pointer"
            on:click=move |_| on_select.call(Rc::clone(&selected))
        >
            <td class="px-4 py-3 text-sm text-fg">{leave_type}</td>
            <td class="px-4 py-3 text-sm text-fg">{apply_date}</td>
            <td class="px-4 py-3 text-sm text-fg">{from}</td>
            <td class="px-4 py-3 text-sm text-fg">{to}</td>
            <td class="px-4 py-3 text-sm text-fg">{days}</td>
            <td class="px-4 py-3 text-sm"><StatusBadge status=status /></td>
            <td class="px-4 py-3 text-sm text-fg">{reason}</td>
            <td class="px-4 py-3 text-sm text-fg">{approver}</td>
            <td class="px-4 py-3 text-sm">
                {if is_pending {
                    view! {
                        <button
                            class="text-action-danger-text hover:underline disabled:opacity-50"
                            disabled=deleting
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_delete.call(id_for_delete.clone());
                            }
                        >
                            {"Delete"}
                        </button>
                    }
                    .into_view()
                } else {
                    view! { <span class="text-fg-muted">{"-"}</span> }.into_view()
                }}
            </td>
        </tr>
    }
}

#[component]
pub fn LeaveList(
    snapshot: Signal<LeaveListSnapshot>,
    loading: Signal<bool>,
    on_select: Callback<Rc<EnrichedLeave>>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let rows = move || snapshot.with(|s| s.visible_rows.clone());
    let is_empty = move || snapshot.with(|s| s.visible_rows.is_empty());

    view! {
        <div class="bg-surface-elevated shadow rounded-lg">
            <Show when=move || loading.get()>
                <LoadingSpinner />
            </Show>
            <Show when=move || !loading.get() && is_empty()>
                <div class="p-4">
                    <EmptyState title="No leave applications found." />
                </div>
            </Show>
            <Show when=move || !is_empty()>
                <div class="overflow-x-auto">
                    <table class="min-w-full divide-y divide-border">
                        <thead class="bg-surface-muted">
                            <tr>
                                {HEADERS
                                    .into_iter()
                                    .map(|header| view! {
                                        <th class="px-4 py-3 text-left text-xs font-medium text-fg-muted uppercase tracking-wider">
                                            {header}
                                        </th>
                                    })
                                    .collect_view()}
                            </tr>
                        </thead>
                        <tbody class="divide-y divide-border">
                            <For
                                each=rows
                                key=|leave| leave.id().to_string()
                                children={move |leave: Rc<EnrichedLeave>| leave_row(leave, snapshot, on_select, on_delete)}
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}
