//! PEF configuration retriever
//!
//! Fetches the parameters a caller opted into, in a fixed dependency order:
//! singletons first, then each count-gated table family. A family's
//! governing count is always fetched before its table is sized, even when
//! the caller did not request the count in the output. Each count strictly
//! gates its own family.
//!
//! The first fetch or parse error aborts the retrieval; a partially
//! populated aggregate must not be treated as valid.

use crate::client::{Client, Transport};
use crate::error::Result;
use crate::pef::params::{PefConfig, PefCount, PefParam};

/// Set-selector base for families indexed from 1 (event filters, event
/// filter data-1, alert policies)
const ONE_BASED: u8 = 1;

/// Set-selector base for families indexed from 0 (alert string keys, alert
/// strings, group controls)
const ZERO_BASED: u8 = 0;

/// Resolve the count gating a table family
///
/// When the count's own output slot is requested, it is fetched into place.
/// When it is not but a gated list is, the count is still fetched, into a
/// scratch value that is not published. Otherwise no exchange is made and
/// the count resolves to zero.
fn resolve_count<T, P>(
    client: &mut Client<T>,
    slot: Option<&mut P>,
    list_requested: bool,
) -> Result<u8>
where
    T: Transport,
    P: PefParam + PefCount + Default,
{
    match slot {
        Some(param) => {
            client.fetch_pef_param(&mut *param)?;
            Ok(param.count())
        }
        None if list_requested => {
            let mut scratch = P::default();
            client.fetch_pef_param(&mut scratch)?;
            Ok(scratch.count())
        }
        None => Ok(0),
    }
}

/// Size a requested-but-empty list to `count` entries
///
/// Entry `i` gets set selector `base + i`; pre-populated lists keep the
/// selectors the caller assigned.
fn size_list<P>(list: &mut Vec<P>, count: u8, base: u8, make: impl Fn(u8) -> P) {
    if list.is_empty() && count > 0 {
        list.extend((0..count).map(|i| make(base + i)));
    }
}

/// Fetch every entry of a table family in selector order
fn fetch_entries<T, P>(client: &mut Client<T>, list: &mut [P]) -> Result<()>
where
    T: Transport,
    P: PefParam,
{
    for entry in list.iter_mut() {
        client.fetch_pef_param(entry)?;
    }
    Ok(())
}

/// Retrieve the requested subset of the PEF configuration, in place
pub fn retrieve<T: Transport>(client: &mut Client<T>, config: &mut PefConfig) -> Result<()> {
    use crate::pef::params::{
        AlertPolicy, AlertString, AlertStringKey, EventFilter, EventFilterData1, GroupControl,
    };

    // Singletons, in declaration order
    if let Some(param) = config.set_in_progress.as_mut() {
        client.fetch_pef_param(param)?;
    }
    if let Some(param) = config.control.as_mut() {
        client.fetch_pef_param(param)?;
    }
    if let Some(param) = config.action_global_control.as_mut() {
        client.fetch_pef_param(param)?;
    }
    if let Some(param) = config.startup_delay.as_mut() {
        client.fetch_pef_param(param)?;
    }
    if let Some(param) = config.alert_startup_delay.as_mut() {
        client.fetch_pef_param(param)?;
    }

    // Event filters: one count gates both the filter table and the data-1
    // view of it; entries are indexed from 1.
    let filters_requested =
        config.event_filters.is_some() || config.event_filters_data1.is_some();
    let filter_count = resolve_count(
        client,
        config.event_filters_count.as_mut(),
        filters_requested,
    )?;

    if let Some(filters) = config.event_filters.as_mut() {
        size_list(filters, filter_count, ONE_BASED, EventFilter::with_selector);
        fetch_entries(client, filters)?;
    }
    if let Some(entries) = config.event_filters_data1.as_mut() {
        size_list(
            entries,
            filter_count,
            ONE_BASED,
            EventFilterData1::with_selector,
        );
        fetch_entries(client, entries)?;
    }

    // Alert policies, indexed from 1
    let policies_requested = config.alert_policies.is_some();
    let policy_count = resolve_count(
        client,
        config.alert_policies_count.as_mut(),
        policies_requested,
    )?;

    if let Some(policies) = config.alert_policies.as_mut() {
        size_list(policies, policy_count, ONE_BASED, AlertPolicy::with_selector);
        fetch_entries(client, policies)?;
    }

    if let Some(param) = config.system_guid.as_mut() {
        client.fetch_pef_param(param)?;
    }

    // Alert strings: one count gates the key table and the string table;
    // entries are indexed from 0.
    let strings_requested =
        config.alert_string_keys.is_some() || config.alert_strings.is_some();
    let string_count = resolve_count(
        client,
        config.alert_strings_count.as_mut(),
        strings_requested,
    )?;

    if let Some(keys) = config.alert_string_keys.as_mut() {
        size_list(keys, string_count, ZERO_BASED, AlertStringKey::with_selector);
        fetch_entries(client, keys)?;
    }
    if let Some(strings) = config.alert_strings.as_mut() {
        size_list(strings, string_count, ZERO_BASED, AlertString::with_selector);
        fetch_entries(client, strings)?;
    }

    // Group controls, indexed from 0
    let groups_requested = config.group_controls.is_some();
    let group_count = resolve_count(
        client,
        config.group_controls_count.as_mut(),
        groups_requested,
    )?;

    if let Some(groups) = config.group_controls.as_mut() {
        size_list(groups, group_count, ZERO_BASED, GroupControl::with_selector);
        fetch_entries(client, groups)?;
    }

    tracing::debug!("PEF configuration retrieval complete");
    Ok(())
}
