//! PEF Module
//!
//! Platform Event Filtering configuration access: the Get PEF Configuration
//! Parameters command codec, the typed parameter set, and the count-gated
//! retrieval state machine.

mod commands;
mod params;
mod retriever;

pub use commands::{GetPefConfigParamsRequest, GetPefConfigParamsResponse};
pub use params::{
    ActionGlobalControl, AlertPoliciesCount, AlertPolicy, AlertStartupDelay, AlertString,
    AlertStringKey, AlertStringsCount, EventFilter, EventFilterData1, EventFiltersCount,
    GroupControl, GroupControlsCount, PefConfig, PefControl, PefCount, PefParam,
    PefParamSelector, SetInProgress, StartupDelay, SystemGuid,
};
pub use retriever::retrieve;
