use crate::pages::dashboard::types::PendingCounts;
use leptos::*;

#[component]
pub fn PendingSummary(#[prop(into)] counts: Signal<PendingCounts>) -> impl IntoView {
    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 space-y-2">
            <h3 class="text-lg font-semibold text-fg">{"Pending Request"}</h3>
            <a href="/leaves" class="block text-sm text-fg hover:underline">
                {move || format!("{} : Leave", counts.get().leaves)}
            </a>
            <p class="text-sm text-fg">
                {move || format!("{} : Regularization", counts.get().regularizations)}
            </p>
        </div>
    }
}
