use crate::pages::my_leaves::{
    types::{LeaveListSnapshot, PageSize},
    utils::range_label,
};
use leptos::*;

#[component]
pub fn LeavePagination(
    snapshot: Signal<LeaveListSnapshot>,
    on_page_size: Callback<String>,
    on_previous: Callback<()>,
    on_next: Callback<()>,
) -> impl IntoView {
    let label = move || {
        snapshot.with(|s| range_label(s.current_page, s.page_size, s.total_count))
    };
    let at_start = move || snapshot.with(|s| s.current_page <= 1);
    let at_end = move || snapshot.with(|s| s.current_page >= s.total_pages);
    let page_size = move || snapshot.with(|s| s.page_size.get().to_string());

    view! {
        <div class="flex items-center justify-end gap-4 px-6 py-3 text-sm text-fg-muted">
            <label class="flex items-center gap-2">
                {"Rows per page:"}
                <select
                    class="border rounded px-2 py-1"
                    prop:value=page_size
                    on:change=move |ev| on_page_size.call(event_target_value(&ev))
                >
                    {PageSize::ALL
                        .into_iter()
                        .map(|size| {
                            let value = size.get().to_string();
                            view! { <option value=value.clone()>{value}</option> }
                        })
                        .collect_view()}
                </select>
            </label>
            <span>{label}</span>
            <button
                aria-label="Previous page"
                class="px-2 disabled:opacity-40"
                disabled=at_start
                on:click=move |_| on_previous.call(())
            >
                {"‹"}
            </button>
            <button
                aria-label="Next page"
                class="px-2 disabled:opacity-40"
                disabled=at_end
                on:click=move |_| on_next.call(())
            >
                {"›"}
            </button>
        </div>
    }
}
