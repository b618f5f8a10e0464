//! Client Module
//!
//! The exchange engine: serialize a request, hand it to the transport,
//! classify the completion code, deserialize the reply.
//!
//! ## Architecture
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                 Caller / CLI                 │
//! └──────┬────────────────┬─────────────────┬────┘
//!        │ single fetch   │ repository walk │ config retrieval
//! ┌──────▼────────────────▼─────────────────▼────┐
//! │              Client::exchange                │
//! │   pack → transport → completion → unpack     │
//! └──────────────────────┬───────────────────────┘
//! ┌──────────────────────▼───────────────────────┐
//! │              Transport (1 channel)           │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Strictly half-duplex: one outstanding exchange per channel, synchronous
//! from the caller's point of view. No retries at this layer.

mod transport;

pub use transport::{TcpTransport, Transport};

use crate::error::{IpmiError, Result};
use crate::message::{completion, IpmiRequest, IpmiResponse};
use crate::pef::{GetPefConfigParamsRequest, GetPefConfigParamsResponse, PefConfig, PefParam, PefParamSelector};
use crate::sdr::{GetSdrRequest, GetSdrResponse, SdrRecord, SdrRecordType};

/// A client for one controller over one transport channel
///
/// Independent clients over different channels may run fully in parallel;
/// within one client every fetch is sequential by construction.
pub struct Client<T: Transport> {
    transport: T,
}

impl<T: Transport> Client<T> {
    /// Create a client over an established transport channel
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Borrow the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Tear down the client and recover the transport channel
    pub fn into_transport(self) -> T {
        self.transport
    }

    // =========================================================================
    // Exchange Engine
    // =========================================================================

    /// Perform one request/response exchange
    ///
    /// 1. Serialize the request.
    /// 2. Hand identifier + bytes to the transport; transport errors
    ///    propagate unchanged.
    /// 3. Non-zero completion code fails with the resolved message
    ///    (command-specific table first, then universal).
    /// 4. Deserialize the reply into a fresh response; unpack failures
    ///    surface as malformed-response errors.
    pub fn exchange<Q, R>(&mut self, request: &Q) -> Result<R>
    where
        Q: IpmiRequest,
        R: IpmiResponse,
    {
        let data = request.pack();
        let command = request.command();

        let (code, reply) = self.transport.send(command, &data)?;

        if code != completion::CC_OK {
            let message = completion::resolve(code, R::completion_codes());
            tracing::debug!(
                "Command {:?}/{:#04x} failed with completion {:#04x}: {}",
                command.netfn,
                command.code,
                code,
                message
            );
            return Err(IpmiError::Completion { code, message });
        }

        let mut response = R::default();
        response.unpack(&reply)?;
        Ok(response)
    }

    // =========================================================================
    // SDR Repository
    // =========================================================================

    /// Fetch one SDR record, whole, by record id
    ///
    /// `0x0000` addresses the first record in the repository.
    pub fn get_sdr(&mut self, record_id: u16) -> Result<GetSdrResponse> {
        let request = GetSdrRequest::whole_record(record_id);
        self.exchange(&request)
    }

    /// Walk the SDR repository and return the records matching `filter`
    ///
    /// `None` accepts all record types. Any fetch or parse failure aborts
    /// the walk; no partial results are returned.
    pub fn get_sdrs(&mut self, filter: Option<SdrRecordType>) -> Result<Vec<SdrRecord>> {
        crate::sdr::walk(self, filter)
    }

    // =========================================================================
    // PEF Configuration
    // =========================================================================

    /// Fetch one PEF configuration parameter at (selector, set, block)
    pub fn get_pef_config_params(
        &mut self,
        revision_only: bool,
        selector: PefParamSelector,
        set_selector: u8,
        block_selector: u8,
    ) -> Result<GetPefConfigParamsResponse> {
        let request = GetPefConfigParamsRequest {
            revision_only,
            selector,
            set_selector,
            block_selector,
        };
        self.exchange(&request)
    }

    /// Fetch one typed PEF parameter into place
    pub fn fetch_pef_param<P: PefParam + ?Sized>(&mut self, param: &mut P) -> Result<()> {
        let (selector, set_selector, block_selector) = param.address();
        let response = self.get_pef_config_params(false, selector, set_selector, block_selector)?;
        param.unpack(&response.data)
    }

    /// Retrieve the full PEF configuration (all parameters requested)
    pub fn get_pef_config(&mut self) -> Result<PefConfig> {
        let mut config = PefConfig::full();
        self.get_pef_config_into(&mut config)?;
        Ok(config)
    }

    /// Retrieve exactly the parameters the caller opted into
    ///
    /// `None` slots are never fetched and never allocated; list slots left
    /// `Some(vec![])` are sized from their governing count. The first error
    /// aborts the retrieval and the aggregate must be considered invalid.
    pub fn get_pef_config_into(&mut self, config: &mut PefConfig) -> Result<()> {
        crate::pef::retrieve(self, config)
    }
}
