use crate::pages::my_leaves::utils::FilterFormState;
use leptos::*;

#[component]
pub fn LeaveFilter(
    filter_form: FilterFormState,
    on_apply: Callback<()>,
    on_reset: Callback<()>,
) -> impl IntoView {
    let status = filter_form.status_signal();
    let date_from = filter_form.date_from_signal();
    let date_to = filter_form.date_to_signal();
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-4 flex flex-col gap-3 md:flex-row md:items-end">
            <label class="flex flex-col text-sm text-fg-muted">
                {"Status"}
                <select
                    class="border rounded px-2 py-1 text-sm"
                    prop:value=move || status.get()
                    on:change=move |ev| status.set(event_target_value(&ev))
                >
                    <option value="All">{"All"}</option>
                    <option value="pending">{"Pending"}</option>
                    <option value="approved">{"Approved"}</option>
                    <option value="rejected">{"Rejected"}</option>
                </select>
            </label>
            <label class="flex flex-col text-sm text-fg-muted">
                {"From"}
                <input
                    type="date"
                    class="border rounded px-2 py-1 text-sm"
                    prop:value=move || date_from.get()
                    on:input=move |ev| date_from.set(event_target_value(&ev))
                />
            </label>
            <label class="flex flex-col text-sm text-fg-muted">
                {"To"}
                <input
                    type="date"
                    class="border rounded px-2 py-1 text-sm"
                    prop:value=move || date_to.get()
                    on:input=move |ev| date_to.set(event_target_value(&ev))
                />
            </label>
            <div class="flex gap-2">
                <button
                    class="px-4 py-1.5 rounded bg-action-primary-bg text-action-primary-text text-sm font-semibold"
                    on:click=move |_| on_apply.call(())
                >
                    {"Filter"}
                </button>
                <button
                    class="px-4 py-1.5 rounded bg-surface-muted text-fg text-sm"
                    on:click=move |_| on_reset.call(())
                >
                    {"Reset"}
                </button>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn leave_filter_renders_controls() {
        let html = render_to_string(move || {
            view! {
                <LeaveFilter
                    filter_form=FilterFormState::default()
                    on_apply=Callback::new(|_| {})
                    on_reset=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("type=\"date\""));
        assert!(html.contains("value=\"rejected\""));
        assert!(html.contains("Filter"));
        assert!(html.contains("Reset"));
    }
}
