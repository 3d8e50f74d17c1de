use crate::components::layout::Layout;
use leptos::*;

#[component]
pub fn MyLeavesLayout(children: Children) -> impl IntoView {
    view! {
        <Layout>
            <div class="space-y-6">
                <div>
                    <h1 class="text-2xl font-bold text-fg">{"My Leaves"}</h1>
                    <p class="mt-1 text-sm text-fg-muted">
                        {"Review your leave applications and withdraw pending ones."}
                    </p>
                </div>
                {children()}
            </div>
        </Layout>
    }
}
