//! Typed PEF configuration parameters
//!
//! Each parameter is addressed on the wire by a (parameter selector, set
//! selector, block selector) 3-tuple. Singletons use set selector 0; table
//! entries carry their own positional set selector. Whether a family indexes
//! its entries from 1 or from 0 is a fixed property of the family, not
//! inferred at runtime.

use crate::error::{IpmiError, Result};
use crate::wire;

/// PEF configuration parameter selectors (IPMI 30.4)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PefParamSelector {
    SetInProgress = 0,
    PefControl = 1,
    ActionGlobalControl = 2,
    StartupDelay = 3,
    AlertStartupDelay = 4,
    NumberOfEventFilters = 5,
    EventFilter = 6,
    EventFilterData1 = 7,
    NumberOfAlertPolicies = 8,
    AlertPolicy = 9,
    SystemGuid = 10,
    NumberOfAlertStrings = 11,
    AlertStringKey = 12,
    AlertString = 13,
    NumberOfGroupControls = 14,
    GroupControl = 15,
}

/// A typed configuration parameter
///
/// `address` yields the wire 3-tuple; `unpack` consumes the parameter data
/// bytes of a successful fetch.
pub trait PefParam {
    fn address(&self) -> (PefParamSelector, u8, u8);
    fn unpack(&mut self, data: &[u8]) -> Result<()>;
}

/// A parameter carrying a table-entry count in bits [6:0] of its first byte
pub trait PefCount {
    fn count(&self) -> u8;
}

fn require(data: &[u8], needed: usize) -> Result<()> {
    if data.len() < needed {
        return Err(IpmiError::Truncated {
            needed,
            got: data.len(),
        });
    }
    Ok(())
}

// =============================================================================
// Singleton Parameters
// =============================================================================

/// Set In Progress (parameter 0)
#[derive(Debug, Clone, Default)]
pub struct SetInProgress {
    /// [1:0] - 00b set complete, 01b set in progress, 10b commit write
    pub state: u8,
}

impl PefParam for SetInProgress {
    fn address(&self) -> (PefParamSelector, u8, u8) {
        (PefParamSelector::SetInProgress, 0, 0)
    }

    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        let (b, _) = wire::unpack_u8(data, 0)?;
        self.state = b & 0x03;
        Ok(())
    }
}

/// PEF Control (parameter 1)
#[derive(Debug, Clone, Default)]
pub struct PefControl {
    pub pef_enabled: bool,
    pub event_messages_enabled: bool,
    pub startup_delay_enabled: bool,
    pub alert_startup_delay_enabled: bool,
}

impl PefParam for PefControl {
    fn address(&self) -> (PefParamSelector, u8, u8) {
        (PefParamSelector::PefControl, 0, 0)
    }

    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        let (b, _) = wire::unpack_u8(data, 0)?;
        self.pef_enabled = b & 0x01 != 0;
        self.event_messages_enabled = b & 0x02 != 0;
        self.startup_delay_enabled = b & 0x04 != 0;
        self.alert_startup_delay_enabled = b & 0x08 != 0;
        Ok(())
    }
}

/// PEF Action Global Control (parameter 2)
#[derive(Debug, Clone, Default)]
pub struct ActionGlobalControl {
    pub alert: bool,
    pub power_down: bool,
    pub reset: bool,
    pub power_cycle: bool,
    pub oem_action: bool,
    pub diagnostic_interrupt: bool,
}

impl PefParam for ActionGlobalControl {
    fn address(&self) -> (PefParamSelector, u8, u8) {
        (PefParamSelector::ActionGlobalControl, 0, 0)
    }

    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        let (b, _) = wire::unpack_u8(data, 0)?;
        self.alert = b & 0x01 != 0;
        self.power_down = b & 0x02 != 0;
        self.reset = b & 0x04 != 0;
        self.power_cycle = b & 0x08 != 0;
        self.oem_action = b & 0x10 != 0;
        self.diagnostic_interrupt = b & 0x20 != 0;
        Ok(())
    }
}

/// PEF Startup Delay (parameter 3)
#[derive(Debug, Clone, Default)]
pub struct StartupDelay {
    pub seconds: u8,
}

impl PefParam for StartupDelay {
    fn address(&self) -> (PefParamSelector, u8, u8) {
        (PefParamSelector::StartupDelay, 0, 0)
    }

    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        let (b, _) = wire::unpack_u8(data, 0)?;
        self.seconds = b;
        Ok(())
    }
}

/// PEF Alert Startup Delay (parameter 4)
#[derive(Debug, Clone, Default)]
pub struct AlertStartupDelay {
    pub seconds: u8,
}

impl PefParam for AlertStartupDelay {
    fn address(&self) -> (PefParamSelector, u8, u8) {
        (PefParamSelector::AlertStartupDelay, 0, 0)
    }

    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        let (b, _) = wire::unpack_u8(data, 0)?;
        self.seconds = b;
        Ok(())
    }
}

/// System GUID (parameter 10)
#[derive(Debug, Clone, Default)]
pub struct SystemGuid {
    /// GUID is used in PET traps instead of the one from Get System GUID
    pub used_for_pet: bool,
    pub guid: [u8; 16],
}

impl PefParam for SystemGuid {
    fn address(&self) -> (PefParamSelector, u8, u8) {
        (PefParamSelector::SystemGuid, 0, 0)
    }

    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        let (b, offset) = wire::unpack_u8(data, 0)?;
        self.used_for_pet = b & 0x01 != 0;
        let (bytes, _) = wire::unpack_bytes(data, offset, 16)?;
        self.guid.copy_from_slice(&bytes);
        Ok(())
    }
}

// =============================================================================
// Count Parameters
// =============================================================================

macro_rules! count_param {
    ($(#[$doc:meta])* $name:ident, $selector:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            pub value: u8,
        }

        impl PefParam for $name {
            fn address(&self) -> (PefParamSelector, u8, u8) {
                (PefParamSelector::$selector, 0, 0)
            }

            fn unpack(&mut self, data: &[u8]) -> Result<()> {
                let (b, _) = wire::unpack_u8(data, 0)?;
                self.value = b & 0x7F;
                Ok(())
            }
        }

        impl PefCount for $name {
            fn count(&self) -> u8 {
                self.value
            }
        }
    };
}

count_param!(
    /// Number of Event Filters (parameter 5)
    EventFiltersCount,
    NumberOfEventFilters
);
count_param!(
    /// Number of Alert Policy Entries (parameter 8)
    AlertPoliciesCount,
    NumberOfAlertPolicies
);
count_param!(
    /// Number of Alert Strings (parameter 11)
    AlertStringsCount,
    NumberOfAlertStrings
);
count_param!(
    /// Number of Group Controls (parameter 14)
    GroupControlsCount,
    NumberOfGroupControls
);

// =============================================================================
// Table-Entry Parameters
// =============================================================================

/// Event Filter table entry (parameter 6, set selectors 1..=count)
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub set_selector: u8,

    /// 20 bytes of filter data, kept raw
    pub data: Vec<u8>,
}

impl EventFilter {
    pub fn with_selector(set_selector: u8) -> Self {
        Self {
            set_selector,
            data: Vec::new(),
        }
    }
}

impl PefParam for EventFilter {
    fn address(&self) -> (PefParamSelector, u8, u8) {
        (PefParamSelector::EventFilter, self.set_selector, 0)
    }

    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        require(data, 2)?;
        let (selector, offset) = wire::unpack_u8(data, 0)?;
        self.set_selector = selector;
        let (body, _) = wire::unpack_bytes(data, offset, data.len() - offset)?;
        self.data = body;
        Ok(())
    }
}

/// Event Filter data byte 1 (parameter 7, set selectors 1..=count)
#[derive(Debug, Clone, Default)]
pub struct EventFilterData1 {
    pub set_selector: u8,

    /// Byte 1 of the filter entry: [7] enable, [6:5] filter type
    pub config: u8,
}

impl EventFilterData1 {
    pub fn with_selector(set_selector: u8) -> Self {
        Self {
            set_selector,
            config: 0,
        }
    }
}

impl PefParam for EventFilterData1 {
    fn address(&self) -> (PefParamSelector, u8, u8) {
        (PefParamSelector::EventFilterData1, self.set_selector, 0)
    }

    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        require(data, 2)?;
        self.set_selector = data[0];
        self.config = data[1];
        Ok(())
    }
}

/// Alert Policy table entry (parameter 9, set selectors 1..=count)
#[derive(Debug, Clone, Default)]
pub struct AlertPolicy {
    pub set_selector: u8,

    /// 3 bytes of policy entry data, kept raw
    pub data: Vec<u8>,
}

impl AlertPolicy {
    pub fn with_selector(set_selector: u8) -> Self {
        Self {
            set_selector,
            data: Vec::new(),
        }
    }
}

impl PefParam for AlertPolicy {
    fn address(&self) -> (PefParamSelector, u8, u8) {
        (PefParamSelector::AlertPolicy, self.set_selector, 0)
    }

    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        require(data, 2)?;
        let (selector, offset) = wire::unpack_u8(data, 0)?;
        self.set_selector = selector;
        let (body, _) = wire::unpack_bytes(data, offset, data.len() - offset)?;
        self.data = body;
        Ok(())
    }
}

/// Alert String Key (parameter 12, set selectors 0..count)
#[derive(Debug, Clone, Default)]
pub struct AlertStringKey {
    pub set_selector: u8,
    pub event_filter: u8,
    pub alert_string_set: u8,
}

impl AlertStringKey {
    pub fn with_selector(set_selector: u8) -> Self {
        Self {
            set_selector,
            event_filter: 0,
            alert_string_set: 0,
        }
    }
}

impl PefParam for AlertStringKey {
    fn address(&self) -> (PefParamSelector, u8, u8) {
        (PefParamSelector::AlertStringKey, self.set_selector, 0)
    }

    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        require(data, 3)?;
        self.set_selector = data[0];
        self.event_filter = data[1] & 0x7F;
        self.alert_string_set = data[2] & 0x7F;
        Ok(())
    }
}

/// Alert String block (parameter 13, set selectors 0..count)
#[derive(Debug, Clone, Default)]
pub struct AlertString {
    pub set_selector: u8,

    /// Block number within the string; the retriever fetches block 0
    pub block_selector: u8,

    /// String bytes for the addressed block
    pub data: Vec<u8>,
}

impl AlertString {
    pub fn with_selector(set_selector: u8) -> Self {
        Self {
            set_selector,
            block_selector: 0,
            data: Vec::new(),
        }
    }
}

impl PefParam for AlertString {
    fn address(&self) -> (PefParamSelector, u8, u8) {
        (
            PefParamSelector::AlertString,
            self.set_selector,
            self.block_selector,
        )
    }

    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        require(data, 2)?;
        let (selector, offset) = wire::unpack_u8(data, 0)?;
        self.set_selector = selector;
        let (block, offset) = wire::unpack_u8(data, offset)?;
        self.block_selector = block;
        let (body, _) = wire::unpack_bytes(data, offset, data.len() - offset)?;
        self.data = body;
        Ok(())
    }
}

/// Group Control table entry (parameter 15, set selectors 0..count)
#[derive(Debug, Clone, Default)]
pub struct GroupControl {
    pub set_selector: u8,

    /// Entry data, kept raw
    pub data: Vec<u8>,
}

impl GroupControl {
    pub fn with_selector(set_selector: u8) -> Self {
        Self {
            set_selector,
            data: Vec::new(),
        }
    }
}

impl PefParam for GroupControl {
    fn address(&self) -> (PefParamSelector, u8, u8) {
        (PefParamSelector::GroupControl, self.set_selector, 0)
    }

    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        require(data, 2)?;
        let (selector, offset) = wire::unpack_u8(data, 0)?;
        self.set_selector = selector;
        let (body, _) = wire::unpack_bytes(data, offset, data.len() - offset)?;
        self.data = body;
        Ok(())
    }
}

// =============================================================================
// Configuration Aggregate
// =============================================================================

/// The PEF configuration aggregate
///
/// Every slot is opt-in: `None` means "do not fetch", so round trips stay
/// proportional to the data the caller asked for. List slots left
/// `Some(vec![])` are sized from their governing count during retrieval;
/// pre-populated lists are fetched as-is.
#[derive(Debug, Clone, Default)]
pub struct PefConfig {
    pub set_in_progress: Option<SetInProgress>,
    pub control: Option<PefControl>,
    pub action_global_control: Option<ActionGlobalControl>,
    pub startup_delay: Option<StartupDelay>,
    pub alert_startup_delay: Option<AlertStartupDelay>,

    pub event_filters_count: Option<EventFiltersCount>,
    pub event_filters: Option<Vec<EventFilter>>,
    pub event_filters_data1: Option<Vec<EventFilterData1>>,

    pub alert_policies_count: Option<AlertPoliciesCount>,
    pub alert_policies: Option<Vec<AlertPolicy>>,

    pub system_guid: Option<SystemGuid>,

    pub alert_strings_count: Option<AlertStringsCount>,
    pub alert_string_keys: Option<Vec<AlertStringKey>>,
    pub alert_strings: Option<Vec<AlertString>>,

    pub group_controls_count: Option<GroupControlsCount>,
    pub group_controls: Option<Vec<GroupControl>>,
}

impl PefConfig {
    /// An aggregate with every parameter requested
    pub fn full() -> Self {
        Self {
            set_in_progress: Some(SetInProgress::default()),
            control: Some(PefControl::default()),
            action_global_control: Some(ActionGlobalControl::default()),
            startup_delay: Some(StartupDelay::default()),
            alert_startup_delay: Some(AlertStartupDelay::default()),
            event_filters_count: Some(EventFiltersCount::default()),
            event_filters: Some(Vec::new()),
            event_filters_data1: Some(Vec::new()),
            alert_policies_count: Some(AlertPoliciesCount::default()),
            alert_policies: Some(Vec::new()),
            system_guid: Some(SystemGuid::default()),
            alert_strings_count: Some(AlertStringsCount::default()),
            alert_string_keys: Some(Vec::new()),
            alert_strings: Some(Vec::new()),
            group_controls_count: Some(GroupControlsCount::default()),
            group_controls: Some(Vec::new()),
        }
    }
}
