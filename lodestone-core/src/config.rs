//! Bridge configuration
//!
//! Board pin map and the timing constants the natives use. Stored as
//! postcard binary data when the `serde` feature is enabled.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Maximum IR protocol name length
pub const MAX_PROTOCOL_LEN: usize = 16;

/// Configuration load/store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Stored data was written by a different format version
    VersionMismatch { found: u8 },
    /// Data could not be (de)serialized
    Encoding,
}

/// Board pins reported to scripts by `gpio.pins()`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinMap {
    pub grove_sda: i32,
    pub grove_scl: i32,
    pub serial_tx: i32,
    pub serial_rx: i32,
    pub spi_sck: i32,
    pub spi_mosi: i32,
    pub spi_miso: i32,
    pub spi_ss: i32,
    pub ir_tx: i32,
    pub ir_rx: i32,
}

impl Default for PinMap {
    fn default() -> Self {
        Self {
            grove_sda: 16,
            grove_scl: 15,
            serial_tx: 43,
            serial_rx: 44,
            spi_sck: 14,
            spi_mosi: 3,
            spi_miso: 2,
            spi_ss: 21,
            ir_tx: 2,
            ir_rx: 3,
        }
    }
}

impl PinMap {
    /// Script-visible names and pin numbers, in report order
    pub fn entries(&self) -> [(&'static str, i32); 10] {
        [
            ("grove_sda", self.grove_sda),
            ("grove_scl", self.grove_scl),
            ("serial_tx", self.serial_tx),
            ("serial_rx", self.serial_rx),
            ("spi_sck", self.spi_sck),
            ("spi_mosi", self.spi_mosi),
            ("spi_miso", self.spi_miso),
            ("spi_ss", self.spi_ss),
            ("ir_tx", self.ir_tx),
            ("ir_rx", self.ir_rx),
        ]
    }
}

/// Infrared defaults
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IrDefaults {
    /// `irRead` timeout when none is given (seconds)
    pub receive_timeout_s: i32,
    /// Delay between receiver polls (ms)
    pub poll_interval_ms: u32,
    /// `irTransmit` protocol when none is given
    pub protocol: String<MAX_PROTOCOL_LEN>,
    /// `irTransmit` bit count when none is given
    pub bits: i32,
}

impl Default for IrDefaults {
    fn default() -> Self {
        let mut protocol = String::new();
        let _ = protocol.push_str("NEC");
        Self {
            receive_timeout_s: 10,
            poll_interval_ms: 10,
            protocol,
            bits: 32,
        }
    }
}

/// Fault reporter timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaultTiming {
    /// Pause after rendering so a held key is not taken as acknowledgment
    pub settle_ms: u32,
    /// Any-key poll interval
    pub ack_poll_ms: u32,
}

impl Default for FaultTiming {
    fn default() -> Self {
        Self {
            settle_ms: 500,
            ack_poll_ms: 50,
        }
    }
}

/// Console limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsoleLimits {
    /// Arguments beyond this are ignored by `print`
    pub max_args: usize,
    /// Mirror `print` to the display as well as serial
    pub print_to_display: bool,
}

impl Default for ConsoleLimits {
    fn default() -> Self {
        Self {
            max_args: 20,
            print_to_display: true,
        }
    }
}

/// Complete bridge configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BridgeConfig {
    /// Format version; must stay the first field
    pub version: u8,
    pub pins: PinMap,
    pub ir: IrDefaults,
    pub fault: FaultTiming,
    pub console: ConsoleLimits,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            pins: PinMap::default(),
            ir: IrDefaults::default(),
            fault: FaultTiming::default(),
            console: ConsoleLimits::default(),
        }
    }
}

#[cfg(feature = "serde")]
impl BridgeConfig {
    /// Load from postcard bytes
    ///
    /// The version byte is checked before the rest is decoded, since other
    /// versions may not share this layout.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        match bytes.first() {
            None => return Err(ConfigError::Encoding),
            Some(&found) if found != CONFIG_VERSION => return Err(ConfigError::VersionMismatch { found }),
            Some(_) => {}
        }
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Encoding)
    }

    /// Store as postcard bytes
    pub fn to_vec(&self) -> Result<alloc::vec::Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::Encoding)
    }
}
