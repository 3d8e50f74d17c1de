use crate::pages::my_leaves::{
    components::status_badge::StatusBadge,
    types::EnrichedLeave,
    utils::{display_date, display_day_count},
};
use leptos::ev::KeyboardEvent;
use leptos::*;
use std::rc::Rc;

#[component]
pub fn LeaveDetailModal(
    selected: RwSignal<Option<Rc<EnrichedLeave>>>,
    on_delete: Callback<String>,
    #[prop(into)] deleting: Signal<bool>,
) -> impl IntoView {
    let close = move || selected.set(None);
    let on_dialog_keydown = move |ev: KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            close();
        }
    };

    view! {
        <Show when=move || selected.with(Option::is_some)>
            {move || {
                selected.get().map(|leave| {
                    let record = &leave.record;
                    let id = record.id.clone();
                    let is_pending = record.status.is_pending();
                    let rows = [
                        ("Type", record.leave_type.clone()),
                        ("From", display_date(record.date_from)),
                        ("To", display_date(record.date_to)),
                        ("Duration", match record.day_count() {
                            Some(days) => format!("{} day(s)", display_day_count(Some(days))),
                            None => "-".to_string(),
                        }),
                        ("Approved By", leave.approver_display.clone()),
                        ("Reason", record.reason.clone().unwrap_or_else(|| "-".into())),
                    ];
                    let status = record.status.clone();
                    view! {
                        <div class="fixed inset-0 z-50 flex items-end sm:items-center justify-center">
                            <div class="fixed inset-0 bg-overlay-backdrop" on:click=move |_| close()></div>
                            <div
                                class="relative bg-surface-elevated rounded-lg shadow-xl w-full max-w-md mx-4 p-6 space-y-4"
                                role="dialog"
                                aria-modal="true"
                                tabindex="-1"
                                on:keydown=on_dialog_keydown
                            >
                                <div class="flex items-center justify-between">
                                    <p class="text-lg font-semibold text-fg">{"Leave Details"}</p>
                                    <button
                                        aria-label="Close"
                                        class="text-fg-muted hover:text-fg"
                                        on:click=move |_| close()
                                    >
                                        {"✕"}
                                    </button>
                                </div>
                                <dl class="space-y-2 text-sm text-fg">
                                    {rows
                                        .into_iter()
                                        .map(|(label, value)| view! {
                                            <div class="flex gap-2">
                                                <dt class="font-medium text-fg-muted">{label}{":"}</dt>
                                                <dd>{value}</dd>
                                            </div>
                                        })
                                        .collect_view()}
                                    <div class="flex gap-2">
                                        <dt class="font-medium text-fg-muted">{"Status:"}</dt>
                                        <dd><StatusBadge status=status /></dd>
                                    </div>
                                </dl>
                                <div class="flex justify-end gap-2">
                                    <Show when=move || is_pending>
                                        {
                                            let id = id.clone();
                                            view! {
                                                <button
                                                    class="px-4 py-2 rounded bg-action-danger-bg text-action-danger-text disabled:opacity-50"
                                                    disabled=move || deleting.get()
                                                    on:click=move |_| on_delete.call(id.clone())
                                                >
                                                    {"Delete"}
                                                </button>
                                            }
                                        }
                                    </Show>
                                    <button
                                        class="px-4 py-2 rounded bg-surface-muted text-fg hover:bg-surface-elevated"
                                        on:click=move |_| close()
                                    >
                                        {"Close"}
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                })
            }}
        </Show>
    }
}
