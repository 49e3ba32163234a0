use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    sync::{LazyLock, Mutex, PoisonError},
};

///
/// EventState
/// Ephemeral, process-wide counters for registry and query activity.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
    pub(crate) entities: BTreeMap<String, EntityCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Registry
    pub descriptors_built: u64,
    pub descriptor_cache_hits: u64,
    pub missing_schema: u64,

    // Query construction
    pub fetches_built: u64,
    pub schema_sort_keys: u64,
    pub structural_sort_keys: u64,
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub descriptor_cache_hits: u64,
    pub fetches_built: u64,
    pub structural_sort_keys: u64,
}

///
/// EventReport
/// Point-in-time copy of the global counters.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
}

static STATE: LazyLock<Mutex<EventState>> = LazyLock::new(|| Mutex::new(EventState::default()));

// Counters are append-only, so a poisoned guard still holds usable data.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    let mut guard = STATE.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

pub(crate) fn report() -> EventReport {
    with_state_mut(|state| EventReport {
        ops: state.ops.clone(),
        entities: state.entities.clone(),
    })
}

pub(crate) fn reset() {
    with_state_mut(|state| *state = EventState::default());
}
