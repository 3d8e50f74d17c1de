use crate::api::AttendanceRecord;
use crate::pages::dashboard::utils::{location_address, location_label};
use crate::state::session::WorkMode;
use crate::utils::time::format_clock_time;
use chrono_tz::Tz;
use leptos::*;

#[component]
fn ModeSwitch(
    mode: WorkMode,
    active: Signal<WorkMode>,
    on_toggle: Callback<WorkMode>,
) -> impl IntoView {
    view! {
        <label class="inline-flex items-center gap-2 text-sm text-fg">
            <input
                type="checkbox"
                class="h-4 w-4"
                prop:checked=move || active.get() == mode
                on:change=move |_| on_toggle.call(mode)
            />
            {mode.label()}
        </label>
    }
}

#[component]
pub fn AttendanceCard(
    #[prop(into)] attendance: Signal<Option<AttendanceRecord>>,
    #[prop(into)] time_zone: Signal<Tz>,
    #[prop(into)] work_mode: Signal<WorkMode>,
    #[prop(into)] worked: Signal<String>,
    #[prop(into)] probation: Signal<String>,
    #[prop(into)] busy: Signal<bool>,
    on_toggle_mode: Callback<WorkMode>,
    on_check_in: Callback<()>,
    on_check_out: Callback<()>,
    on_see_location: Callback<()>,
) -> impl IntoView {
    let check_in = move || attendance.with(|a| a.as_ref().and_then(|r| r.check_in));
    let check_out = move || attendance.with(|a| a.as_ref().and_then(|r| r.check_out));
    let check_in_disabled = move || busy.get() || check_in().is_some();
    let check_out_disabled = move || busy.get() || check_in().is_none() || check_out().is_some();
    let label = move || attendance.with(|a| location_label(a.as_ref()));
    let address = move || attendance.with(|a| location_address(a.as_ref()));

    view! {
        <div class="bg-surface-elevated shadow rounded-lg p-6 grid grid-cols-1 gap-6 md:grid-cols-2">
            <div class="space-y-3">
                <h2 class="text-xl font-semibold text-fg">{"Today's Attendance"}</h2>
                {move || match check_in() {
                    Some(at) => {
                        let tz = time_zone.get();
                        view! {
                            <div class="text-sm space-y-1">
                                <p class="text-status-success-text">
                                    {format!("Checked in at {}", format_clock_time(at, tz))}
                                </p>
                                {check_out().map(|out| view! {
                                    <p class="text-status-error-text">
                                        {format!("Checked out at {}", format_clock_time(out, tz))}
                                    </p>
                                })}
                            </div>
                        }
                        .into_view()
                    }
                    None => view! { <p class="text-sm text-fg-muted">{"Not Checked In"}</p> }.into_view(),
                }}
                <p class="text-sm text-fg">
                    <strong>{"Total Hours: "}</strong>
                    {move || worked.get()}
                </p>
                <div class="flex gap-6">
                    <ModeSwitch mode=WorkMode::Wfo active=work_mode on_toggle=on_toggle_mode />
                    <ModeSwitch mode=WorkMode::Wfh active=work_mode on_toggle=on_toggle_mode />
                </div>
                <div class="flex gap-2">
                    <button
                        class="px-4 py-2 rounded bg-action-primary-bg text-action-primary-text disabled:opacity-50"
                        disabled=check_in_disabled
                        on:click=move |_| on_check_in.call(())
                    >
                        {"Check-In"}
                    </button>
                    <button
                        class="px-4 py-2 rounded bg-action-danger-bg text-action-danger-text disabled:opacity-50"
                        disabled=check_out_disabled
                        on:click=move |_| on_check_out.call(())
                    >
                        {"Check-Out"}
                    </button>
                </div>
            </div>
            <div class="space-y-3">
                <div class="rounded-full border border-border px-4 py-2 text-center text-sm text-fg">
                    <strong>{"Status: "}</strong>
                    {move || probation.get()}
                </div>
                <p class="text-sm text-fg">
                    <strong>{label}{": "}</strong>
                    {address}
                </p>
                <div class="flex justify-center">
                    <button
                        class="px-3 py-1 text-sm rounded border border-action-primary-bg text-action-primary-bg hover:bg-action-primary-bg hover:text-action-primary-text"
                        on:click=move |_| on_see_location.call(())
                    >
                        {"See Location"}
                    </button>
                </div>
            </div>
        </div>
    }
}
