use crate::state::session::use_session;
use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    let session = use_session();
    let (menu_open, set_menu_open) = create_signal(false);
    let user_label = move || {
        session
            .user_id()
            .map(|id| format!("Signed in as {}", id))
            .unwrap_or_default()
    };
    let toggle_menu = move |_| set_menu_open.update(|open| *open = !*open);
    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center">
                        <h1 class="text-xl font-semibold text-fg">
                            "HRDesk"
                        </h1>
                    </div>
                    <div class="flex items-center gap-4">
                        <nav class="hidden lg:flex space-x-4">
                            <a href="/" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                "Dashboard"
                            </a>
                            <a href="/leaves" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover">
                                "My Leaves"
                            </a>
                        </nav>
                        <span class="hidden lg:inline text-xs text-fg-muted">{user_label}</span>
                        <button
                            class="lg:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg"
                            aria-label="Toggle menu"
                            on:click=toggle_menu
                        >
                            <i class="fas fa-bars"></i>
                        </button>
                    </div>
                </div>
                <Show when=move || menu_open.get()>
                    <div class="lg:hidden pb-4">
                        <nav class="flex flex-col space-y-1">
                            <a href="/" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                                "Dashboard"
                            </a>
                            <a href="/leaves" class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium">
                                "My Leaves"
                            </a>
                        </nav>
                    </div>
                </Show>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-surface">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 sm:px-6 lg:px-8">
                <SessionWarningBanner/>
                {children()}
            </main>
        </div>
    }
}

/// Shown when the host page did not publish a signed-in user.
#[component]
pub fn SessionWarningBanner() -> impl IntoView {
    let session = use_session();
    let missing_user = move || session.user_id().is_none();

    view! {
        <Show when=missing_user>
            <div class="mb-4">
                <div class="bg-status-warning-bg border border-status-warning-border text-status-warning-text px-4 py-3 rounded">
                    <p class="font-semibold">{"You are not signed in"}</p>
                    <p class="text-sm mt-1">{"Sign in again to see your attendance and leaves."}</p>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}

#[component]
pub fn ErrorMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-error-bg border border-status-error-border text-status-error-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-exclamation-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn SuccessMessage(message: String) -> impl IntoView {
    view! {
        <div class="bg-status-success-bg border border-status-success-border text-status-success-text px-4 py-3 rounded mb-4">
            <div class="flex">
                <div class="flex-shrink-0">
                    <i class="fas fa-check-circle"></i>
                </div>
                <div class="ml-3">
                    <p class="text-sm">{message}</p>
                </div>
            </div>
        </div>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::session::{provide_session, Session};
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn header_renders_navigation_and_user() {
        let html = render_to_string(move || {
            provide_session(Session {
                user_id: Some("emp-7".into()),
                ..Session::default()
            });
            view! { <Header /> }
        });
        assert!(html.contains("My Leaves"));
        assert!(html.contains("Signed in as emp-7"));
    }

    #[test]
    fn layout_warns_without_user() {
        let html = render_to_string(move || {
            provide_session(Session::default());
            view! { <Layout><div>"child"</div></Layout> }
        });
        assert!(html.contains("child"));
        assert!(html.contains("You are not signed in"));
    }

    #[test]
    fn layout_hides_warning_with_user() {
        let html = render_to_string(move || {
            provide_session(Session {
                user_id: Some("emp-7".into()),
                ..Session::default()
            });
            view! { <Layout><div>"child"</div></Layout> }
        });
        assert!(!html.contains("You are not signed in"));
    }

    #[test]
    fn renders_feedback_components() {
        let html = render_to_string(move || {
            view! {
                <div>
                    <LoadingSpinner />
                    <ErrorMessage message="error".into() />
                    <SuccessMessage message="ok".into() />
                </div>
            }
        });
        assert!(html.contains("error"));
        assert!(html.contains("ok"));
    }
}
