use crate::api::{ApiClient, ApiError};
use crate::state::{prompt::DialogPrompt, session::use_session};
use leptos::*;
use std::rc::Rc;

use super::{
    repository::{LeaveGateway, LeavesRepository},
    store::MyLeavesStore,
    types::{
        DeleteOutcome, EnrichedLeave, LeaveListError, LeaveListSnapshot, LoadOutcome, PageSize,
    },
    utils::{FilterFormState, MessageState},
};

#[derive(Clone, Copy)]
pub struct MyLeavesViewModel {
    pub snapshot: RwSignal<LeaveListSnapshot>,
    pub message: RwSignal<MessageState>,
    pub selected: RwSignal<Option<Rc<EnrichedLeave>>>,
    pub filter_form: FilterFormState,
    pub prompt: StoredValue<DialogPrompt>,
    pub load_action: Action<String, Result<LoadOutcome, LeaveListError>>,
    pub delete_action: Action<String, Result<DeleteOutcome, LeaveListError>>,
    store: StoredValue<Rc<MyLeavesStore>>,
}

fn apply_optional_load_result(
    result: Option<Result<LoadOutcome, LeaveListError>>,
    message: RwSignal<MessageState>,
    selected: RwSignal<Option<Rc<EnrichedLeave>>>,
    filter_form: FilterFormState,
) {
    match result {
        Some(Ok(LoadOutcome::Applied(_))) => {
            selected.set(None);
            filter_form.reset();
        }
        Some(Err(err)) => message.update(|msg| msg.set_error(err.into())),
        Some(Ok(LoadOutcome::Superseded)) | None => {}
    }
}

fn apply_optional_delete_result(
    result: Option<Result<DeleteOutcome, LeaveListError>>,
    message: RwSignal<MessageState>,
    selected: RwSignal<Option<Rc<EnrichedLeave>>>,
) {
    match result {
        Some(Ok(DeleteOutcome::Deleted(_))) => {
            message.update(|msg| msg.set_success("Leave deleted."));
            selected.set(None);
        }
        Some(Err(err)) => message.update(|msg| msg.set_error(err.into())),
        Some(Ok(DeleteOutcome::Cancelled)) | None => {}
    }
}

impl MyLeavesViewModel {
    pub fn new() -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        Self::with_gateway(Rc::new(LeavesRepository::new(api)))
    }

    pub fn with_gateway(gateway: Rc<dyn LeaveGateway>) -> Self {
        let store = Rc::new(MyLeavesStore::new(gateway));
        let snapshot = create_rw_signal(store.snapshot());
        let subscription = store.subscribe(move |next| {
            let _ = snapshot.try_set(next.clone());
        });
        {
            let store = Rc::clone(&store);
            on_cleanup(move || store.unsubscribe(subscription));
        }
        let store = store_value(store);

        let message = create_rw_signal(MessageState::default());
        let selected = create_rw_signal(None::<Rc<EnrichedLeave>>);
        let filter_form = FilterFormState::default();
        let prompt = store_value(DialogPrompt::new("Delete leave"));

        let load_action = create_action(move |user_id: &String| {
            let store = store.get_value();
            let user_id = user_id.clone();
            async move { store.load(&user_id).await }
        });

        let delete_action = create_action(move |id: &String| {
            let store = store.get_value();
            let prompt = prompt.get_value();
            let id = id.clone();
            async move { store.delete(&id, &prompt).await }
        });

        create_effect(move |_| {
            apply_optional_load_result(load_action.value().get(), message, selected, filter_form);
        });
        create_effect(move |_| {
            apply_optional_delete_result(delete_action.value().get(), message, selected);
        });

        Self {
            snapshot,
            message,
            selected,
            filter_form,
            prompt,
            load_action,
            delete_action,
            store,
        }
    }

    /// Reloads whenever the signed-in user or the shared refresh counter
    /// changes.
    pub fn reload_on_session_change(&self) {
        let session = use_session();
        let load_action = self.load_action;
        let message = self.message;
        create_effect(move |_| {
            session.leave_refresh.track();
            match session.session.with(|s| s.user_id.clone()) {
                Some(user_id) => load_action.dispatch(user_id),
                None => message.update(|msg| {
                    msg.set_error(ApiError::unauthorized("Sign in to see your leaves."))
                }),
            }
        });
    }

    pub fn loading(&self) -> Signal<bool> {
        self.load_action.pending().into()
    }

    pub fn apply_filter(&self) {
        match self.filter_form.to_criteria() {
            Ok(criteria) => {
                self.message.update(|msg| msg.clear());
                self.store.with_value(|store| store.set_filter(criteria));
            }
            Err(err) => self.message.update(|msg| msg.set_error(err)),
        }
    }

    pub fn reset_filter(&self) {
        self.filter_form.reset();
        self.message.update(|msg| msg.clear());
        self.store.with_value(|store| store.reset_filter());
    }

    pub fn set_page(&self, page: usize) {
        self.store.with_value(|store| store.set_page(page));
    }

    pub fn next_page(&self) {
        self.store.with_value(|store| store.next_page());
    }

    pub fn previous_page(&self) {
        self.store.with_value(|store| store.previous_page());
    }

    pub fn set_page_size(&self, raw: &str) {
        match raw.trim().parse::<usize>().ok().map(PageSize::try_from) {
            Some(Ok(size)) => {
                self.store.with_value(|store| store.set_page_size(size));
            }
            _ => log::warn!("Ignoring unsupported page size {:?}", raw),
        }
    }

    pub fn request_delete(&self, id: String) {
        self.message.update(|msg| msg.clear());
        self.delete_action.dispatch(id);
    }
}

pub fn use_my_leaves_view_model() -> MyLeavesViewModel {
    match use_context::<MyLeavesViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = MyLeavesViewModel::new();
            provide_context(vm);
            vm
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{LeaveRecord, LeaveStatus};
    use crate::pages::my_leaves::utils::fixtures::{enriched, record};
    use crate::test_support::ssr::with_runtime;
    use async_trait::async_trait;
    use futures::executor::block_on;

    struct StaticGateway(Vec<LeaveRecord>);

    #[async_trait(?Send)]
    impl LeaveGateway for StaticGateway {
        async fn list_leaves(&self, _user_id: &str) -> Result<Vec<LeaveRecord>, ApiError> {
            Ok(self.0.clone())
        }

        async fn person_name(&self, _person_id: &str) -> Result<String, ApiError> {
            Err(ApiError::not_found("unknown"))
        }

        async fn delete_leave(&self, _leave_id: &str) -> Result<(), ApiError> {
            Ok(())
        }
    }

    fn seeded_view_model(count: u32) -> MyLeavesViewModel {
        let records = (1..=count)
            .map(|day| record(&format!("l{day}"), LeaveStatus::Pending, (2024, 7, day)))
            .collect();
        let vm = MyLeavesViewModel::with_gateway(Rc::new(StaticGateway(records)));
        let store = vm.store.get_value();
        block_on(store.load("u1")).unwrap();
        vm
    }

    #[test]
    fn snapshot_signal_tracks_store_operations() {
        with_runtime(|| {
            let vm = seeded_view_model(12);
            assert_eq!(vm.snapshot.get_untracked().loaded_count, 12);

            vm.next_page();
            assert_eq!(vm.snapshot.get_untracked().current_page, 2);
            vm.set_page(9);
            assert_eq!(vm.snapshot.get_untracked().current_page, 2);
            vm.previous_page();
            assert_eq!(vm.snapshot.get_untracked().current_page, 1);

            vm.set_page_size("25");
            let snapshot = vm.snapshot.get_untracked();
            assert_eq!(snapshot.page_size, PageSize::TwentyFive);
            assert_eq!(snapshot.visible_rows.len(), 12);

            vm.set_page_size("7");
            assert_eq!(vm.snapshot.get_untracked().page_size, PageSize::TwentyFive);
        });
    }

    #[test]
    fn invalid_filter_input_reports_validation_error() {
        with_runtime(|| {
            let vm = seeded_view_model(3);
            vm.filter_form.date_from_signal().set("2024/07/01".into());
            vm.apply_filter();
            let error = vm.message.get_untracked().error.unwrap();
            assert_eq!(error.code, "VALIDATION_ERROR");
            assert_eq!(vm.snapshot.get_untracked().total_count, 3);

            vm.filter_form.date_from_signal().set("2024-07-02".into());
            vm.apply_filter();
            assert!(vm.message.get_untracked().error.is_none());
            assert_eq!(vm.snapshot.get_untracked().total_count, 2);

            vm.reset_filter();
            assert_eq!(vm.snapshot.get_untracked().total_count, 3);
            assert_eq!(vm.filter_form.date_from_signal().get_untracked(), "");
        });
    }

    #[test]
    fn load_result_resets_selection_and_reports_errors() {
        with_runtime(|| {
            let message = create_rw_signal(MessageState::default());
            let selected = create_rw_signal(Some(enriched(record(
                "l1",
                LeaveStatus::Pending,
                (2024, 1, 1),
            ))));
            let filter_form = FilterFormState::default();
            filter_form.status_signal().set("approved".into());

            apply_optional_load_result(
                Some(Ok(LoadOutcome::Applied(LeaveListSnapshot::default()))),
                message,
                selected,
                filter_form,
            );
            assert!(selected.get_untracked().is_none());
            assert_eq!(filter_form.status_signal().get_untracked(), "All");

            apply_optional_load_result(
                Some(Err(LeaveListError::NetworkFailure(ApiError::request_failed(
                    "offline",
                )))),
                message,
                selected,
                filter_form,
            );
            assert_eq!(message.get_untracked().error.unwrap().error, "offline");
        });
    }

    #[test]
    fn delete_result_updates_message() {
        with_runtime(|| {
            let message = create_rw_signal(MessageState::default());
            let selected = create_rw_signal(None::<Rc<EnrichedLeave>>);

            apply_optional_delete_result(Some(Ok(DeleteOutcome::Cancelled)), message, selected);
            assert!(message.get_untracked().success.is_none());

            apply_optional_delete_result(
                Some(Ok(DeleteOutcome::Deleted(LeaveListSnapshot::default()))),
                message,
                selected,
            );
            assert_eq!(
                message.get_untracked().success.as_deref(),
                Some("Leave deleted.")
            );

            apply_optional_delete_result(
                Some(Err(LeaveListError::AlreadyInProgress("l1".into()))),
                message,
                selected,
            );
            assert!(message.get_untracked().error.is_some());
            assert!(message.get_untracked().success.is_none());
        });
    }
}
