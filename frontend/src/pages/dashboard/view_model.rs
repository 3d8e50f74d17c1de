use crate::api::{ApiClient, ApiError, ApplyLeaveRequest, AttendanceRecord};
use crate::pages::dashboard::{
    clock::{self, ClockContext},
    repository::{fetch_pending_counts, fetch_today_attendance, DashboardGateway, DashboardRepository},
    types::{AttendanceError, CheckOutOutcome, PendingCounts},
    utils::{probation_status, worked_duration, QuickLeaveForm},
};
use crate::pages::my_leaves::utils::MessageState;
use crate::state::{
    prompt::DialogPrompt,
    session::{use_session, SessionContext, WorkMode},
};
use crate::utils::{
    location::{BrowserLocation, LocationProvider},
    time::today_in,
};
use chrono::Utc;
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct DashboardViewModel {
    pub session: SessionContext,
    pub attendance: RwSignal<Option<AttendanceRecord>>,
    pub pending: RwSignal<PendingCounts>,
    pub message: RwSignal<MessageState>,
    pub leave_message: RwSignal<MessageState>,
    pub quick_leave: QuickLeaveForm,
    pub prompt: StoredValue<DialogPrompt>,
    pub attendance_action: Action<String, Option<AttendanceRecord>>,
    pub pending_action: Action<String, Result<PendingCounts, ApiError>>,
    pub check_in_action: Action<ClockContext, Result<Option<AttendanceRecord>, AttendanceError>>,
    pub check_out_action: Action<ClockContext, Result<CheckOutOutcome, AttendanceError>>,
    pub apply_leave_action: Action<ApplyLeaveRequest, Result<(), ApiError>>,
}

/// Returns `true` when the server answered without a record and today's
/// attendance should be fetched again.
fn apply_check_in_result(
    result: Option<Result<Option<AttendanceRecord>, AttendanceError>>,
    attendance: RwSignal<Option<AttendanceRecord>>,
    message: RwSignal<MessageState>,
) -> bool {
    match result {
        Some(Ok(record)) => {
            message.update(|msg| msg.set_success("Checked in successfully"));
            let reload = record.is_none();
            if record.is_some() {
                attendance.set(record);
            }
            reload
        }
        Some(Err(err)) => {
            message.update(|msg| msg.set_error(err.into()));
            false
        }
        None => false,
    }
}

fn apply_check_out_result(
    result: Option<Result<CheckOutOutcome, AttendanceError>>,
    attendance: RwSignal<Option<AttendanceRecord>>,
    message: RwSignal<MessageState>,
) -> bool {
    match result {
        Some(Ok(CheckOutOutcome::CheckedOut(record))) => {
            message.update(|msg| msg.set_success("Checked out successfully"));
            let reload = record.is_none();
            if record.is_some() {
                attendance.set(record);
            }
            reload
        }
        Some(Err(err)) => {
            message.update(|msg| msg.set_error(err.into()));
            false
        }
        Some(Ok(CheckOutOutcome::Cancelled)) | None => false,
    }
}

fn apply_leave_result(
    result: Option<Result<(), ApiError>>,
    message: RwSignal<MessageState>,
    form: QuickLeaveForm,
    session: SessionContext,
) {
    match result {
        Some(Ok(())) => {
            message.update(|msg| msg.set_success("Leave applied successfully."));
            form.reset();
            session.bump_leave_refresh();
        }
        Some(Err(err)) => message.update(|msg| msg.set_error(err)),
        None => {}
    }
}

impl DashboardViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        Self::with_services(
            Rc::new(DashboardRepository::new(api)),
            Rc::new(BrowserLocation),
        )
    }

    pub fn with_services(
        gateway: Rc<dyn DashboardGateway>,
        location: Rc<dyn LocationProvider>,
    ) -> Self {
        let session = use_session();
        let gateway = store_value(gateway);
        let location = store_value(location);
        let prompt = store_value(DialogPrompt::new("Check out"));

        let attendance = create_rw_signal(None::<AttendanceRecord>);
        let pending = create_rw_signal(PendingCounts::default());
        let message = create_rw_signal(MessageState::default());
        let leave_message = create_rw_signal(MessageState::default());
        let quick_leave = QuickLeaveForm::default();

        let attendance_action = create_action(move |user_id: &String| {
            let gateway = gateway.get_value();
            let user_id = user_id.clone();
            async move { fetch_today_attendance(gateway.as_ref(), &user_id).await }
        });
        let pending_action = create_action(move |user_id: &String| {
            let gateway = gateway.get_value();
            let user_id = user_id.clone();
            async move { fetch_pending_counts(gateway.as_ref(), &user_id).await }
        });
        let check_in_action = create_action(move |ctx: &ClockContext| {
            let gateway = gateway.get_value();
            let location = location.get_value();
            let ctx = ctx.clone();
            async move { clock::check_in(gateway.as_ref(), location.as_ref(), &ctx).await }
        });
        let check_out_action = create_action(move |ctx: &ClockContext| {
            let gateway = gateway.get_value();
            let location = location.get_value();
            let prompt = prompt.get_value();
            let ctx = ctx.clone();
            async move {
                clock::check_out(gateway.as_ref(), location.as_ref(), &prompt, &ctx, Utc::now())
                    .await
            }
        });
        let apply_leave_action = create_action(move |request: &ApplyLeaveRequest| {
            let gateway = gateway.get_value();
            let request = request.clone();
            async move { gateway.apply_leave(&request).await }
        });

        let reload_attendance = move || {
            if let Some(user_id) = session.user_id() {
                attendance_action.dispatch(user_id);
            }
        };

        create_effect(move |_| {
            if let Some(record) = attendance_action.value().get() {
                attendance.set(record);
            }
        });
        create_effect(move |_| match pending_action.value().get() {
            Some(Ok(counts)) => pending.set(counts),
            Some(Err(err)) => log::warn!("Pending counters unavailable: {}", err),
            None => {}
        });
        create_effect(move |_| {
            if apply_check_in_result(check_in_action.value().get(), attendance, message) {
                reload_attendance();
            }
        });
        create_effect(move |_| {
            if apply_check_out_result(check_out_action.value().get(), attendance, message) {
                reload_attendance();
            }
        });
        create_effect(move |_| {
            apply_leave_result(
                apply_leave_action.value().get(),
                leave_message,
                quick_leave,
                session,
            );
        });

        Self {
            session,
            attendance,
            pending,
            message,
            leave_message,
            quick_leave,
            prompt,
            attendance_action,
            pending_action,
            check_in_action,
            check_out_action,
            apply_leave_action,
        }
    }

    /// Loads today's attendance when the user changes and the pending
    /// counters whenever leaves may have changed.
    pub fn load_on_session_change(&self) {
        let session = self.session;
        let attendance_action = self.attendance_action;
        let pending_action = self.pending_action;
        let attendance = self.attendance;
        create_effect(move |_| match session.user_id() {
            Some(user_id) => attendance_action.dispatch(user_id),
            None => attendance.set(None),
        });
        create_effect(move |_| {
            session.leave_refresh.track();
            if let Some(user_id) = session.user_id() {
                pending_action.dispatch(user_id);
            }
        });
    }

    pub fn clock_context(&self) -> ClockContext {
        let time_zone = self.session.time_zone();
        ClockContext {
            user_id: self.session.user_id(),
            today: today_in(time_zone),
            time_zone,
            work_mode: self.session.work_mode(),
            current: self.attendance.get_untracked(),
        }
    }

    pub fn clock_pending(&self) -> Signal<bool> {
        let check_in = self.check_in_action.pending();
        let check_out = self.check_out_action.pending();
        Signal::derive(move || check_in.get() || check_out.get())
    }

    pub fn handle_check_in(&self) {
        if self.clock_pending().get_untracked() {
            return;
        }
        self.message.update(|msg| msg.clear());
        self.check_in_action.dispatch(self.clock_context());
    }

    pub fn handle_check_out(&self) {
        if self.clock_pending().get_untracked() {
            return;
        }
        self.message.update(|msg| msg.clear());
        self.check_out_action.dispatch(self.clock_context());
    }

    pub fn toggle_work_mode(&self, mode: WorkMode) {
        self.session.toggle_work_mode(mode);
    }

    pub fn see_location(&self) {
        let current = self.attendance.get_untracked();
        match clock::location_link(current.as_ref()) {
            Ok(url) => open_in_new_tab(&url),
            Err(err) => self.message.update(|msg| msg.set_error(err.into())),
        }
    }

    pub fn submit_quick_leave(&self) {
        let Some(user_id) = self.session.user_id() else {
            self.leave_message
                .update(|msg| msg.set_error(AttendanceError::MissingUser.into()));
            return;
        };
        match self.quick_leave.to_request(&user_id) {
            Ok(request) => {
                self.leave_message.update(|msg| msg.clear());
                self.apply_leave_action.dispatch(request);
            }
            Err(err) => self.leave_message.update(|msg| msg.set_error(err)),
        }
    }

    pub fn worked_duration(&self) -> Signal<String> {
        let attendance = self.attendance;
        Signal::derive(move || attendance.with(|record| worked_duration(record.as_ref())))
    }

    pub fn probation_status(&self) -> Signal<String> {
        let session = self.session.session;
        Signal::derive(move || {
            session.with(|s| probation_status(s.doj, s.probation_months, today_in(s.time_zone)))
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.open_with_url_and_target(url, "_blank") {
            log::warn!("Could not open {}: {:?}", url, err);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn open_in_new_tab(url: &str) {
    log::info!("Open {}", url);
}

pub fn use_dashboard_view_model() -> DashboardViewModel {
    match use_context::<DashboardViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = DashboardViewModel::new();
            provide_context(vm);
            vm
        }
    }
}
