/// Subunits ("dollarydoos") per HNS.
pub const COIN: u64 = 1_000_000;

/// Default minimum relay rate in subunits per kilobyte; also the dust rate.
pub const MIN_RELAY: u64 = 1_000;

/// Maximum length of a name in bytes.
pub const MAX_NAME_SIZE: usize = 63;
