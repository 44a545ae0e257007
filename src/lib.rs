//! # RTU UDP Sim - Modbus Drive Simulator
//!
//! **Version:** 0.1.0
//! **License:** MIT
//!
//! Simulates the device side of Modbus RTU frames carried in UDP datagrams,
//! so a drive controller can be exercised without the drive. The simulated
//! device keeps two banks of 16-bit registers, answers reads and writes, and
//! signs every reply with a CRC-16/MODBUS.
//!
//! ## Supported Function Codes
//!
//! | Code | Function | Served |
//! |------|----------|--------|
//! | 0x03 | Read Holding Registers | ✅ |
//! | 0x04 | Read Input Registers | ✅ |
//! | 0x06 | Write Single Register | ✅ |
//! | 0x10 | Write Multiple Registers | ✅ |
//!
//! Other function codes, short frames and frames whose declared lengths do
//! not fit the datagram are dropped without a reply. There are no exception
//! responses.
//!
//! ## Quick Start
//!
//! ```rust
//! use rtu_udp_sim::{FrameEngine, RegisterStore};
//!
//! let mut engine = FrameEngine::new(RegisterStore::with_drive_defaults());
//!
//! // Read one holding register at 282 (PAN position)
//! let response = engine.process(&[0x01, 0x03, 0x01, 0x1A, 0x00, 0x01]).unwrap();
//! assert_eq!(&response[..5], &[0x01, 0x03, 0x02, 0x03, 0xE8]);
//!
//! // Unsupported function: no reply
//! assert!(engine.process(&[0x01, 0x99, 0x00, 0x00]).is_none());
//! ```
//!
//! Serving over UDP:
//!
//! ```rust,no_run
//! use rtu_udp_sim::{ModbusResult, RegisterStore, SimulatorConfig, UdpSimulator};
//!
//! #[tokio::main]
//! async fn main() -> ModbusResult<()> {
//!     let config = SimulatorConfig::new("127.0.0.1:1502")?;
//!     let mut sim = UdpSimulator::bind(config, RegisterStore::with_drive_defaults()).await?;
//!     sim.run().await
//! }
//! ```

// ============================================================================
// Core modules
// ============================================================================

/// Core error types and result handling
pub mod error;

/// Protocol constants: function codes, frame sizes, limits
pub mod constants;

/// CRC-16/MODBUS checksum
pub mod crc;

/// Request decoding
pub mod protocol;

/// Response frame assembly
pub mod frame;

// ============================================================================
// Simulated device
// ============================================================================

/// Holding and input register banks
pub mod store;

/// PAN / TILT drive register layout
pub mod register_map;

/// Engine and simulator settings
pub mod config;

/// Request dispatch
pub mod engine;

/// UDP receive loop
pub mod server;

// ============================================================================
// Re-exports for convenience
// ============================================================================

// === Async runtime (users can use rtu_udp_sim::tokio) ===
pub use tokio;

// === Error handling ===
pub use error::{ModbusError, ModbusResult};

// === Core types ===
pub use crc::crc16;
pub use frame::FrameBuilder;
pub use protocol::{ModbusFunction, Request, RequestFrame, UnitId};

// === Simulator ===
pub use config::{EngineConfig, SimulatorConfig};
pub use engine::{EngineStats, FrameEngine};
pub use register_map::{RegisterDef, RegisterKind, DRIVE_REGISTERS};
pub use server::UdpSimulator;
pub use store::RegisterStore;

// === Protocol limits ===
pub use constants::{DEFAULT_BIND_ADDRESS, MAX_ADU_SIZE, MAX_READ_REGISTERS, MAX_WRITE_REGISTERS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn info() -> String {
    format!("RTU UDP Sim v{} - Modbus RTU-over-UDP drive simulator", VERSION)
}
