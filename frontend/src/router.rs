use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

use crate::{
    pages::{dashboard::DashboardPage, my_leaves::MyLeavesPage},
    state::session::{provide_session, Session},
};

pub const DASHBOARD_PATH: &str = "/";
pub const MY_LEAVES_PATH: &str = "/leaves";

pub const ROUTE_PATHS: &[&str] = &[DASHBOARD_PATH, MY_LEAVES_PATH];

pub fn mount_app(session: Session) {
    mount_to_body(move || app_root(session));
}

/// Provides the session and its API client, then routes.
pub fn app_root(session: Session) -> impl IntoView {
    provide_meta_context();
    provide_context(session.api_client());
    provide_session(session);
    view! {
        <Title text="HRDesk"/>
        <Router>
            <Routes>
                <Route path=DASHBOARD_PATH view=DashboardPage/>
                <Route path=MY_LEAVES_PATH view=MyLeavesPage/>
            </Routes>
        </Router>
    }
}
