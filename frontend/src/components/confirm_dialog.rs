use crate::state::prompt::DialogPrompt;
use leptos::ev::KeyboardEvent;
use leptos::*;

const CONFIRM_PRIMARY: &str = "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-primary-bg text-action-primary-text hover:bg-action-primary-bg-hover disabled:opacity-50";
const CONFIRM_DESTRUCTIVE: &str = "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-action-danger-bg text-action-danger-text hover:bg-action-danger-bg-hover disabled:opacity-50";

fn label_or(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}

#[component]
pub fn ConfirmDialog(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    /// Each line is rendered as its own paragraph.
    #[prop(into)]
    message: MaybeSignal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] confirm_label: MaybeSignal<String>,
    #[prop(optional, into)] cancel_label: MaybeSignal<String>,
    #[prop(optional)] destructive: bool,
) -> impl IntoView {
    let confirm_class = if destructive {
        CONFIRM_DESTRUCTIVE
    } else {
        CONFIRM_PRIMARY
    };
    let title = Signal::derive(move || title.get());
    let confirm_text = Signal::derive(move || label_or(confirm_label.get(), "Yes"));
    let cancel_text = Signal::derive(move || label_or(cancel_label.get(), "No"));
    let lines = Signal::derive(move || {
        message
            .get()
            .lines()
            .map(str::to_string)
            .collect::<Vec<_>>()
    });

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-overlay-backdrop"
                    on:click=move |_| on_cancel.call(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-surface-elevated shadow-xl border border-border p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_cancel.call(());
                        }
                    }
                >
                    <h2 class="text-lg font-semibold text-fg">{move || title.get()}</h2>
                    <div class="space-y-1 text-sm text-fg-muted">
                        {move || {
                            lines
                                .get()
                                .into_iter()
                                .map(|line| view! { <p>{line}</p> })
                                .collect_view()
                        }}
                    </div>
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-surface-muted text-fg hover:bg-surface-elevated"
                            on:click=move |_| on_cancel.call(())
                        >
                            {move || cancel_text.get()}
                        </button>
                        <button
                            type="button"
                            class=confirm_class
                            on:click=move |_| on_confirm.call(())
                        >
                            {move || confirm_text.get()}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

/// Renders the confirmation currently requested through `prompt`.
#[component]
pub fn PromptDialog(
    prompt: StoredValue<DialogPrompt>,
    #[prop(optional, into)] confirm_label: MaybeSignal<String>,
    #[prop(optional)] destructive: bool,
) -> impl IntoView {
    let pending = prompt.with_value(|prompt| prompt.pending());
    let is_open = Signal::derive(move || pending.with(Option::is_some));
    let title = Signal::derive(move || {
        pending.with(|p| p.as_ref().map(|p| p.title.clone()).unwrap_or_default())
    });
    let message = Signal::derive(move || {
        pending.with(|p| p.as_ref().map(|p| p.message.clone()).unwrap_or_default())
    });

    view! {
        <ConfirmDialog
            is_open=is_open
            title=title
            message=message
            on_confirm=Callback::new(move |_| prompt.with_value(|prompt| prompt.respond(true)))
            on_cancel=Callback::new(move |_| prompt.with_value(|prompt| prompt.respond(false)))
            confirm_label=confirm_label
            destructive=destructive
        />
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::prompt::PendingConfirmation;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn confirm_dialog_renders_with_default_labels() {
        let html = render_to_string(move || {
            let is_open = Signal::derive(|| true);
            view! {
                <ConfirmDialog
                    is_open=is_open
                    title="Check out"
                    message="You completed 8.50 hrs.\nFull Day will be considered."
                    on_confirm=Callback::new(|_| {})
                    on_cancel=Callback::new(|_| {})
                />
            }
        });
        assert!(html.contains("role=\"dialog\""));
        assert!(html.contains("aria-modal=\"true\""));
        assert!(html.contains("Check out"));
        assert!(html.contains("You completed 8.50 hrs."));
        assert!(html.contains("Full Day will be considered."));
        assert!(html.contains("Yes"));
        assert!(html.contains("No"));
    }

    #[test]
    fn prompt_dialog_shows_pending_confirmation() {
        let html = render_to_string(move || {
            let prompt = DialogPrompt::new("Delete leave");
            prompt.pending().set(Some(PendingConfirmation {
                title: "Delete leave".into(),
                message: "Delete this pending leave?".into(),
            }));
            view! {
                <PromptDialog prompt=store_value(prompt) confirm_label="Delete" destructive=true />
            }
        });
        assert!(html.contains("Delete this pending leave?"));
        assert!(html.contains("Delete"));
    }

    #[test]
    fn prompt_dialog_is_hidden_without_request() {
        let html = render_to_string(move || {
            let prompt = DialogPrompt::new("Delete leave");
            view! { <PromptDialog prompt=store_value(prompt) /> }
        });
        assert!(!html.contains("role=\"dialog\""));
    }
}
