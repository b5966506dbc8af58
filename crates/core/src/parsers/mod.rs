pub mod gecko;

pub use gecko::{GeckoParseError, parse_gecko};

/// Parse profile bytes into the IR.
///
/// Currently the Gecko JSON format is the only loader; this entry point
/// exists so callers don't bind to a specific format.
pub fn parse_profile(data: &[u8]) -> Result<lagview_protocol::Profile, GeckoParseError> {
    parse_gecko(data)
}
