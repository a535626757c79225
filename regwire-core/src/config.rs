//! Adapter configuration
//!
//! Makes the timing and failure-policy assumptions of the register
//! protocol explicit and tunable instead of baked-in constants.

/// Policy for reads where the device supplies fewer bytes than requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShortReadPolicy {
    /// Report the short transfer as an error
    Fail,
    /// Zero the unwritten tail of the buffer and report the count
    ZeroFill,
    /// Leave the unwritten tail untouched and report the count
    ///
    /// The tail keeps whatever the buffer held before the call. Only
    /// useful for callers written against that contract.
    LeaveStale,
}

/// Register bus configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterBusConfig {
    /// Settle delay in microseconds
    ///
    /// Applied between the register-pointer write and the read request,
    /// and before each byte of a block write. Gives slow slave devices
    /// time to prepare data; not a protocol requirement.
    pub settle_us: u32,
    /// How to resolve reads that deliver fewer bytes than requested
    pub short_read: ShortReadPolicy,
    /// Surface transport failures to the caller
    ///
    /// When false, bus errors are absorbed and the operation carries on
    /// with whatever the bus yields.
    pub strict: bool,
}

impl Default for RegisterBusConfig {
    fn default() -> Self {
        Self {
            settle_us: 100, // empirical value for slow slaves
            short_read: ShortReadPolicy::Fail,
            strict: true,
        }
    }
}

impl RegisterBusConfig {
    /// Legacy silent mode: transport errors absorbed, short reads leave
    /// the buffer tail untouched and stale
    pub const LEGACY: Self = Self {
        settle_us: 100,
        short_read: ShortReadPolicy::LeaveStale,
        strict: false,
    };
}
