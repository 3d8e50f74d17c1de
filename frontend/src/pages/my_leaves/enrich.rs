use crate::api::LeaveRecord;
use futures::{
    future::{join_all, LocalBoxFuture, Shared},
    join, FutureExt,
};
use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::{
    repository::LeaveGateway,
    types::{EnrichedLeave, NOT_AVAILABLE},
    utils::approver_display,
};

type NameLookup<'a> = Shared<LocalBoxFuture<'a, String>>;

/// Id to name cache for one enrichment pass. Concurrent lookups of the same
/// id share one request.
struct NameCache<'a, G: ?Sized> {
    gateway: &'a G,
    entries: RefCell<HashMap<String, NameLookup<'a>>>,
}

impl<'a, G: LeaveGateway + ?Sized> NameCache<'a, G> {
    fn new(gateway: &'a G) -> Self {
        Self {
            gateway,
            entries: RefCell::new(HashMap::new()),
        }
    }

    async fn name(&self, id: Option<&str>) -> String {
        let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
            return NOT_AVAILABLE.to_string();
        };
        let lookup = self
            .entries
            .borrow_mut()
            .entry(id.to_string())
            .or_insert_with(|| Self::fetch(self.gateway, id.to_string()))
            .clone();
        lookup.await
    }

    fn fetch(gateway: &'a G, id: String) -> NameLookup<'a> {
        async move {
            match gateway.person_name(&id).await {
                Ok(name) if !name.trim().is_empty() => name,
                Ok(_) => NOT_AVAILABLE.to_string(),
                Err(err) => {
                    log::warn!("Failed to resolve person {}: {}", id, err);
                    NOT_AVAILABLE.to_string()
                }
            }
        }
        .boxed_local()
        .shared()
    }

    async fn enrich(&self, record: LeaveRecord) -> Rc<EnrichedLeave> {
        let (reporting_manager_name, approver_name, rejected_by_name) = join!(
            self.name(record.reporting_manager_id.as_deref()),
            self.name(record.approver_id.as_deref()),
            self.name(record.rejected_by_id.as_deref()),
        );
        let approver_display = approver_display(
            &record.status,
            &reporting_manager_name,
            &approver_name,
            &rejected_by_name,
        );
        Rc::new(EnrichedLeave {
            record,
            reporting_manager_name,
            approver_name,
            rejected_by_name,
            approver_display,
        })
    }
}

/// Resolves person names for every record concurrently. Output keeps the
/// input order and length.
pub async fn enrich_leaves<G: LeaveGateway + ?Sized>(
    gateway: &G,
    records: Vec<LeaveRecord>,
) -> Vec<Rc<EnrichedLeave>> {
    let cache = NameCache::new(gateway);
    join_all(records.into_iter().map(|record| cache.enrich(record))).await
}
