use crate::components::layout::{ErrorMessage, SuccessMessage};
use crate::pages::dashboard::utils::{QuickLeaveForm, DURATIONS, LEAVE_TYPES};
use crate::pages::my_leaves::utils::MessageState;
use leptos::*;

#[component]
pub fn QuickApplyLeave(
    form: QuickLeaveForm,
    message: RwSignal<MessageState>,
    #[prop(into)] submitting: Signal<bool>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let leave_type = form.leave_type_signal();
    let duration = form.duration_signal();
    let date = form.date_signal();

    view! {
        <form
            class="bg-surface-elevated shadow rounded-lg p-6 space-y-3"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.call(());
            }
        >
            <h3 class="text-lg font-semibold text-fg">{"Quick Apply Leave"}</h3>
            {move || message.get().error.map(|err| view! { <ErrorMessage message=err.error /> })}
            {move || message.get().success.map(|msg| view! { <SuccessMessage message=msg /> })}
            <label class="block text-sm text-fg">
                {"Leave Type"}
                <select
                    class="mt-1 w-full border rounded px-2 py-1"
                    prop:value=move || leave_type.get()
                    on:change=move |ev| leave_type.set(event_target_value(&ev))
                >
                    {LEAVE_TYPES
                        .into_iter()
                        .map(|(value, label)| view! { <option value=value>{label}</option> })
                        .collect_view()}
                </select>
            </label>
            <label class="block text-sm text-fg">
                {"Duration"}
                <select
                    class="mt-1 w-full border rounded px-2 py-1"
                    prop:value=move || duration.get()
                    on:change=move |ev| duration.set(event_target_value(&ev))
                >
                    {DURATIONS
                        .into_iter()
                        .map(|(value, label)| view! { <option value=value>{label}</option> })
                        .collect_view()}
                </select>
            </label>
            <label class="block text-sm text-fg">
                {"Date"}
                <input
                    type="date"
                    class="mt-1 w-full border rounded px-2 py-1"
                    prop:value=move || date.get()
                    on:input=move |ev| date.set(event_target_value(&ev))
                />
            </label>
            <button
                type="submit"
                class="w-full px-4 py-2 rounded bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                disabled=move || submitting.get()
            >
                {"Apply"}
            </button>
        </form>
    }
}
