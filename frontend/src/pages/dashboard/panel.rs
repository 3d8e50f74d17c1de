use crate::components::{
    confirm_dialog::PromptDialog,
    layout::{ErrorMessage, SuccessMessage},
};
use crate::pages::dashboard::{
    components::{AttendanceCard, PendingSummary, QuickApplyLeave},
    layout::DashboardFrame,
    view_model::use_dashboard_view_model,
};
use leptos::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let vm = use_dashboard_view_model();
    vm.load_on_session_change();

    let session = vm.session;
    let message = vm.message;

    view! {
        <>
            <DashboardFrame>
                {move || message.get().error.map(|err| view! { <ErrorMessage message=err.error /> })}
                {move || message.get().success.map(|msg| view! { <SuccessMessage message=msg /> })}
                <div class="grid grid-cols-1 gap-6 lg:grid-cols-3">
                    <div class="lg:col-span-2 space-y-6">
                        <AttendanceCard
                            attendance=vm.attendance
                            time_zone=Signal::derive(move || session.time_zone())
                            work_mode=Signal::derive(move || session.work_mode())
                            worked=vm.worked_duration()
                            probation=vm.probation_status()
                            busy=vm.clock_pending()
                            on_toggle_mode=Callback::new(move |mode| vm.toggle_work_mode(mode))
                            on_check_in=Callback::new(move |_| vm.handle_check_in())
                            on_check_out=Callback::new(move |_| vm.handle_check_out())
                            on_see_location=Callback::new(move |_| vm.see_location())
                        />
                        <PendingSummary counts=vm.pending />
                    </div>
                    <QuickApplyLeave
                        form=vm.quick_leave
                        message=vm.leave_message
                        submitting=vm.apply_leave_action.pending()
                        on_submit=Callback::new(move |_| vm.submit_quick_leave())
                    />
                </div>
            </DashboardFrame>
            <PromptDialog prompt=vm.prompt confirm_label="Check out" />
        </>
    }
}
