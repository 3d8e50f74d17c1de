use std::{
    cell::{Cell, RefCell},
    collections::HashSet,
    rc::Rc,
};

use crate::state::prompt::ConfirmPrompt;

use super::{
    enrich::enrich_leaves,
    repository::LeaveGateway,
    types::{
        DeleteOutcome, EnrichedLeave, FilterCriteria, LeaveListError, LeaveListSnapshot,
        LoadOutcome, PageSize,
    },
    utils::{filter_leaves, page_slice, total_pages, Pager},
};

pub const DELETE_CONFIRMATION: &str = "Delete this pending leave?";

type Listener = Rc<dyn Fn(&LeaveListSnapshot)>;

#[derive(Default)]
struct ListState {
    leaves: Vec<Rc<EnrichedLeave>>,
    criteria: FilterCriteria,
    pager: Pager,
    deleting: HashSet<String>,
}

impl ListState {
    fn filtered(&self) -> Vec<Rc<EnrichedLeave>> {
        filter_leaves(&self.leaves, &self.criteria)
    }

    fn clamp(&mut self) {
        let len = self.filtered().len();
        self.pager.clamp(len);
    }

    fn find(&self, id: &str) -> Option<&Rc<EnrichedLeave>> {
        self.leaves.iter().find(|leave| leave.id() == id)
    }

    fn snapshot(&self) -> LeaveListSnapshot {
        let filtered = self.filtered();
        LeaveListSnapshot {
            visible_rows: page_slice(&filtered, self.pager.current_page, self.pager.page_size),
            current_page: self.pager.current_page,
            total_pages: total_pages(filtered.len(), self.pager.page_size),
            total_count: filtered.len(),
            page_size: self.pager.page_size,
            loaded_count: self.leaves.len(),
            criteria: self.criteria.clone(),
            deleting: self.deleting.clone(),
        }
    }
}

/// Working set of the signed-in user's leaves with filtering, paging and
/// optimistic delete. Every operation emits the resulting snapshot to the
/// subscribers and returns it.
pub struct MyLeavesStore {
    gateway: Rc<dyn LeaveGateway>,
    state: RefCell<ListState>,
    generation: Cell<u64>,
    applied_generation: Cell<u64>,
    listeners: RefCell<Vec<(usize, Listener)>>,
    next_listener: Cell<usize>,
}

impl MyLeavesStore {
    pub fn new(gateway: Rc<dyn LeaveGateway>) -> Self {
        Self {
            gateway,
            state: RefCell::new(ListState::default()),
            generation: Cell::new(0),
            applied_generation: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&LeaveListSnapshot) + 'static) -> usize {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: usize) {
        self.listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    pub fn snapshot(&self) -> LeaveListSnapshot {
        self.state.borrow().snapshot()
    }

    fn emit(&self) -> LeaveListSnapshot {
        let snapshot = self.snapshot();
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
        snapshot
    }

    fn update(&self, f: impl FnOnce(&mut ListState)) -> LeaveListSnapshot {
        f(&mut self.state.borrow_mut());
        self.emit()
    }

    /// Replaces the working set with `user_id`'s leaves and resets filter and
    /// paging. Results of a load overtaken by a newer one are dropped.
    pub async fn load(&self, user_id: &str) -> Result<LoadOutcome, LeaveListError> {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        log::debug!("Loading leaves for {} (generation {})", user_id, generation);

        let result = match self.gateway.list_leaves(user_id).await {
            Ok(records) => Ok(enrich_leaves(self.gateway.as_ref(), records).await),
            Err(err) => Err(err),
        };

        if self.generation.get() != generation {
            log::debug!("Dropping superseded leave load (generation {})", generation);
            return Ok(LoadOutcome::Superseded);
        }

        let leaves = result.map_err(|err| {
            log::warn!("Failed to load leaves: {}", err);
            LeaveListError::NetworkFailure(err)
        })?;
        log::info!("Loaded {} leaves", leaves.len());

        self.applied_generation.set(generation);
        let snapshot = self.update(|state| {
            state.leaves = leaves;
            state.criteria = FilterCriteria::default();
            state.pager = Pager::default();
        });
        Ok(LoadOutcome::Applied(snapshot))
    }

    pub fn set_filter(&self, criteria: FilterCriteria) -> LeaveListSnapshot {
        self.update(|state| {
            state.criteria = criteria;
            state.pager.reset_page();
        })
    }

    pub fn reset_filter(&self) -> LeaveListSnapshot {
        self.set_filter(FilterCriteria::default())
    }

    /// Pages outside `1..=total_pages` are ignored.
    pub fn set_page(&self, page: usize) -> LeaveListSnapshot {
        self.update(|state| {
            let len = state.filtered().len();
            state.pager.go_to(page, len);
        })
    }

    pub fn next_page(&self) -> LeaveListSnapshot {
        self.update(|state| {
            let len = state.filtered().len();
            state.pager.next(len);
        })
    }

    pub fn previous_page(&self) -> LeaveListSnapshot {
        self.update(|state| {
            let len = state.filtered().len();
            state.pager.previous(len);
        })
    }

    pub fn set_page_size(&self, page_size: PageSize) -> LeaveListSnapshot {
        self.update(|state| state.pager.set_page_size(page_size))
    }

    fn release(&self, id: &str) -> LeaveListSnapshot {
        self.update(|state| {
            state.deleting.remove(id);
        })
    }

    /// Deletes a pending leave after `prompt` confirms it. The record is
    /// removed before the request is sent and restored if the request fails,
    /// unless a newer load replaced the working set in the meantime.
    pub async fn delete(
        &self,
        id: &str,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<DeleteOutcome, LeaveListError> {
        {
            let state = self.state.borrow();
            if state.deleting.contains(id) {
                return Err(LeaveListError::AlreadyInProgress(id.to_string()));
            }
            let leave = state
                .find(id)
                .ok_or_else(|| LeaveListError::NotFound(id.to_string()))?;
            if !leave.status().is_pending() {
                return Err(LeaveListError::PreconditionFailed {
                    id: id.to_string(),
                    status: leave.status().clone(),
                });
            }
        }
        self.update(|state| {
            state.deleting.insert(id.to_string());
        });

        if !prompt.confirm(DELETE_CONFIRMATION).await {
            self.release(id);
            return Ok(DeleteOutcome::Cancelled);
        }

        // A load may have replaced the working set while the prompt was open.
        let previous = {
            let mut state = self.state.borrow_mut();
            match state.leaves.iter().position(|leave| leave.id() == id) {
                Some(index) if state.leaves[index].status().is_pending() => {
                    let previous = state.leaves.clone();
                    state.leaves.remove(index);
                    state.clamp();
                    Ok(previous)
                }
                Some(index) => Err(LeaveListError::PreconditionFailed {
                    id: id.to_string(),
                    status: state.leaves[index].status().clone(),
                }),
                None => Err(LeaveListError::NotFound(id.to_string())),
            }
        };
        let previous = match previous {
            Ok(previous) => previous,
            Err(err) => {
                self.release(id);
                return Err(err);
            }
        };
        let applied = self.applied_generation.get();
        self.emit();

        match self.gateway.delete_leave(id).await {
            Ok(()) => {
                log::info!("Deleted leave {}", id);
                Ok(DeleteOutcome::Deleted(self.release(id)))
            }
            Err(err) => {
                log::warn!("Failed to delete leave {}: {}", id, err);
                if self.applied_generation.get() == applied {
                    log::info!("Restoring leave {} after failed delete", id);
                    let mut state = self.state.borrow_mut();
                    state.leaves = previous;
                    state.clamp();
                } else {
                    log::info!("Skipping rollback of leave {}, list was reloaded", id);
                }
                self.release(id);
                Err(LeaveListError::from_delete_failure(id, err))
            }
        }
    }
}
