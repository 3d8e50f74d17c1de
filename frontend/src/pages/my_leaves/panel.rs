use crate::components::{
    confirm_dialog::PromptDialog,
    layout::{ErrorMessage, SuccessMessage},
};
use crate::pages::my_leaves::{
    components::{
        detail_modal::LeaveDetailModal, filter::LeaveFilter, list::LeaveList,
        pagination::LeavePagination,
    },
    layout::MyLeavesLayout,
    types::EnrichedLeave,
    view_model::use_my_leaves_view_model,
};
use leptos::*;
use std::rc::Rc;

#[component]
pub fn MyLeavesPage() -> impl IntoView {
    let vm = use_my_leaves_view_model();
    vm.reload_on_session_change();

    let snapshot: Signal<_> = vm.snapshot.into();
    let message = vm.message;
    let selected = vm.selected;
    let selected_deleting = Signal::derive(move || {
        let id = selected.with(|leave| leave.as_ref().map(|leave| leave.id().to_string()));
        id.map(|id| snapshot.with(|s| s.is_deleting(&id)))
            .unwrap_or(false)
    });

    let on_select = Callback::new(move |leave: Rc<EnrichedLeave>| selected.set(Some(leave)));
    let on_delete = Callback::new(move |id: String| vm.request_delete(id));

    view! {
        <>
            <MyLeavesLayout>
                {move || {
                    message
                        .get()
                        .error
                        .map(|err| view! { <ErrorMessage message=err.error /> })
                }}
                {move || {
                    message
                        .get()
                        .success
                        .map(|msg| view! { <SuccessMessage message=msg /> })
                }}
                <LeaveFilter
                    filter_form=vm.filter_form
                    on_apply=Callback::new(move |_| vm.apply_filter())
                    on_reset=Callback::new(move |_| vm.reset_filter())
                />
                <LeaveList
                    snapshot=snapshot
                    loading=vm.loading()
                    on_select=on_select
                    on_delete=on_delete
                />
                <LeavePagination
                    snapshot=snapshot
                    on_page_size=Callback::new(move |raw: String| vm.set_page_size(&raw))
                    on_previous=Callback::new(move |_| vm.previous_page())
                    on_next=Callback::new(move |_| vm.next_page())
                />
            </MyLeavesLayout>
            <LeaveDetailModal selected=selected on_delete=on_delete deleting=selected_deleting />
            <PromptDialog prompt=vm.prompt confirm_label="Delete" destructive=true />
        </>
    }
}
