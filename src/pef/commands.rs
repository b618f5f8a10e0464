//! Get PEF Configuration Parameters command codec (IPMI 30.4)

use crate::error::{IpmiError, Result};
use crate::message::{Command, IpmiRequest, IpmiResponse, GET_PEF_CONFIG_PARAMS};
use crate::pef::params::PefParamSelector;
use crate::wire;

/// Get PEF Configuration Parameters request
///
/// ```text
/// ┌───────────────────────────────┬─────────────────┬───────────────────┐
/// │ [7] rev only, [6:0] selector  │ Set selector(1) │ Block selector(1) │
/// └───────────────────────────────┴─────────────────┴───────────────────┘
/// ```
/// Set selector is 0 for parameters without one; block selector paginates
/// parameters whose data exceeds one wire unit, 0 otherwise.
#[derive(Debug, Clone)]
pub struct GetPefConfigParamsRequest {
    /// Fetch only the parameter revision, not the data
    pub revision_only: bool,

    pub selector: PefParamSelector,
    pub set_selector: u8,
    pub block_selector: u8,
}

impl IpmiRequest for GetPefConfigParamsRequest {
    fn command(&self) -> Command {
        GET_PEF_CONFIG_PARAMS
    }

    fn pack(&self) -> Vec<u8> {
        let mut msg = vec![0u8; 3];
        let mut b0 = self.selector as u8 & 0x7F;
        if self.revision_only {
            b0 |= 0x80;
        }
        wire::pack_u8(b0, &mut msg, 0);
        wire::pack_u8(self.set_selector, &mut msg, 1);
        wire::pack_u8(self.block_selector, &mut msg, 2);
        msg
    }
}

/// Get PEF Configuration Parameters response
///
/// One fixed byte (parameter revision: MSN = present revision, LSN = oldest
/// backward-compatible revision) followed by the parameter data, which is
/// absent when the request asked for the revision only.
#[derive(Debug, Clone, Default)]
pub struct GetPefConfigParamsResponse {
    pub param_revision: u8,

    /// Raw parameter data, interpreted by the typed parameter's `unpack`
    pub data: Vec<u8>,
}

impl IpmiResponse for GetPefConfigParamsResponse {
    fn unpack(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Err(IpmiError::Truncated { needed: 1, got: 0 });
        }
        let (revision, offset) = wire::unpack_u8(data, 0)?;
        self.param_revision = revision;
        if data.len() > offset {
            let (param_data, _) = wire::unpack_bytes(data, offset, data.len() - offset)?;
            self.data = param_data;
        }
        Ok(())
    }

    fn completion_codes() -> &'static [(u8, &'static str)] {
        &[(0x80, "parameter not supported")]
    }
}
