//! # Simulator Configuration
//!
//! [`EngineConfig`] controls how strictly the frame engine treats requests;
//! [`SimulatorConfig`] adds the network side.
//!
//! The defaults reproduce the behaviour of the drive the simulator stands in
//! for: request checksums are not checked, and register counts are bounded by
//! the Modbus limits.
//!
//! ```rust
//! use rtu_udp_sim::EngineConfig;
//!
//! let config = EngineConfig::new()
//!     .with_request_crc_validation(true)
//!     .with_max_read_registers(50);
//!
//! assert!(config.validate_request_crc);
//! assert_eq!(config.max_read_registers, 50);
//! ```

use std::net::SocketAddr;

use crate::constants::{MAX_READ_REGISTERS, MAX_WRITE_REGISTERS};
use crate::error::{ModbusError, ModbusResult};

/// Default for [`EngineConfig::validate_request_crc`].
pub const DEFAULT_VALIDATE_REQUEST_CRC: bool = false;

/// Frame engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Drop requests whose trailing CRC does not match.
    pub validate_request_crc: bool,
    /// Maximum registers per FC03/FC04 request.
    pub max_read_registers: u16,
    /// Maximum registers per FC16 request.
    pub max_write_registers: u16,
}

impl EngineConfig {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable request CRC checking.
    pub fn with_request_crc_validation(mut self, enabled: bool) -> Self {
        self.validate_request_crc = enabled;
        self
    }

    /// Set maximum read registers.
    pub fn with_max_read_registers(mut self, count: u16) -> Self {
        self.max_read_registers = count;
        self
    }

    /// Set maximum write registers.
    pub fn with_max_write_registers(mut self, count: u16) -> Self {
        self.max_write_registers = count;
        self
    }

    /// Check that the limits can be represented in a response frame.
    pub fn validate(&self) -> ModbusResult<()> {
        if self.max_read_registers > MAX_READ_REGISTERS {
            return Err(ModbusError::configuration(format!(
                "max_read_registers {} exceeds protocol limit {}",
                self.max_read_registers, MAX_READ_REGISTERS
            )));
        }
        if self.max_write_registers > MAX_WRITE_REGISTERS {
            return Err(ModbusError::configuration(format!(
                "max_write_registers {} exceeds protocol limit {}",
                self.max_write_registers, MAX_WRITE_REGISTERS
            )));
        }
        Ok(())
    }

    /// Check if a read request is within limits.
    pub fn is_read_within_limits(&self, count: u16) -> bool {
        count <= self.max_read_registers
    }

    /// Check if a write request is within limits.
    pub fn is_write_within_limits(&self, count: u16) -> bool {
        count <= self.max_write_registers
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validate_request_crc: DEFAULT_VALIDATE_REQUEST_CRC,
            max_read_registers: MAX_READ_REGISTERS,
            max_write_registers: MAX_WRITE_REGISTERS,
        }
    }
}

/// UDP simulator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorConfig {
    /// Local address the socket binds to.
    pub bind_address: SocketAddr,
    pub engine: EngineConfig,
}

impl SimulatorConfig {
    /// Create settings for a bind address such as `"0.0.0.0:1502"`.
    pub fn new(bind_address: &str) -> ModbusResult<Self> {
        let bind_address = bind_address.parse::<SocketAddr>().map_err(|e| {
            ModbusError::configuration(format!("Invalid bind address {}: {}", bind_address, e))
        })?;
        Ok(Self {
            bind_address,
            engine: EngineConfig::default(),
        })
    }

    /// Replace the engine settings.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 502)),
            engine: EngineConfig::default(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_BIND_ADDRESS;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(!config.validate_request_crc);
        assert_eq!(config.max_read_registers, 125);
        assert_eq!(config.max_write_registers, 123);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::new()
            .with_request_crc_validation(true)
            .with_max_read_registers(10)
            .with_max_write_registers(4);

        assert!(config.validate_request_crc);
        assert!(config.is_read_within_limits(10));
        assert!(!config.is_read_within_limits(11));
        assert!(config.is_write_within_limits(4));
        assert!(!config.is_write_within_limits(5));
    }

    #[test]
    fn test_validate_rejects_oversized_limits() {
        let config = EngineConfig::new().with_max_read_registers(126);
        assert!(matches!(
            config.validate(),
            Err(ModbusError::Configuration { .. })
        ));

        let config = EngineConfig::new().with_max_write_registers(200);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_simulator_config() {
        let config = SimulatorConfig::new("0.0.0.0:1502").unwrap();
        assert_eq!(config.bind_address.port(), 1502);

        assert!(SimulatorConfig::new("not an address").is_err());

        let default = SimulatorConfig::default();
        assert_eq!(default.bind_address.to_string(), DEFAULT_BIND_ADDRESS);
    }
}
