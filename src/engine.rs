//! Frame engine: one request datagram in, zero or one response out
//!
//! The engine owns the [`RegisterStore`] and is driven from a single task,
//! one datagram at a time. Nothing in here blocks or awaits.
//!
//! | Code | Response body |
//! |------|---------------|
//! | 0x03 | `unit, fc, byte_count, values...` from holding registers |
//! | 0x04 | `unit, fc, byte_count, values...` from input registers |
//! | 0x06 | first six request bytes echoed |
//! | 0x10 | `unit, fc, addr_hi, addr_lo, count_hi, count_lo` |
//!
//! Every response ends with the CRC of the preceding bytes, low byte first.
//! Requests that are malformed, exceed the configured limits or use any
//! other function code get no response at all.

use bytes::Bytes;
use tracing::{debug, error, warn};

use crate::config::EngineConfig;
use crate::crc::verify_crc;
use crate::error::{ModbusError, ModbusResult};
use crate::frame::FrameBuilder;
use crate::protocol::{ModbusFunction, Request, RequestFrame, UnitId};
use crate::store::RegisterStore;

/// Counters kept by the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub requests: u64,
    pub responses: u64,
    pub dropped: u64,
    pub bytes_received: u64,
    pub bytes_sent: u64,
}

/// Request dispatcher for the simulated device
#[derive(Debug)]
pub struct FrameEngine {
    store: RegisterStore,
    config: EngineConfig,
    stats: EngineStats,
}

impl FrameEngine {
    /// Create an engine with default settings
    pub fn new(store: RegisterStore) -> Self {
        Self {
            store,
            config: EngineConfig::default(),
            stats: EngineStats::default(),
        }
    }

    /// Create an engine with custom settings
    pub fn with_config(store: RegisterStore, config: EngineConfig) -> ModbusResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            stats: EngineStats::default(),
        })
    }

    pub fn store(&self) -> &RegisterStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut RegisterStore {
        &mut self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Handle one datagram. `None` means nothing must be sent back.
    pub fn process(&mut self, datagram: &[u8]) -> Option<Bytes> {
        match self.try_process(datagram) {
            Ok(response) => Some(response),
            Err(e) if e.is_dropped_request() => {
                warn!("Dropping request {:02X?}: {}", datagram, e);
                None
            }
            Err(e) => {
                error!("Failed to process request {:02X?}: {}", datagram, e);
                None
            }
        }
    }

    /// Handle one datagram, returning why it was dropped on failure
    pub fn try_process(&mut self, datagram: &[u8]) -> ModbusResult<Bytes> {
        self.stats.requests += 1;
        self.stats.bytes_received += datagram.len() as u64;

        match self.dispatch(datagram) {
            Ok(response) => {
                self.stats.responses += 1;
                self.stats.bytes_sent += response.len() as u64;
                Ok(response)
            }
            Err(e) => {
                self.stats.dropped += 1;
                Err(e)
            }
        }
    }

    fn dispatch(&mut self, datagram: &[u8]) -> ModbusResult<Bytes> {
        let data = if self.config.validate_request_crc {
            verify_crc(datagram)?
        } else {
            datagram
        };

        let frame = RequestFrame::parse(data)?;
        debug!(
            "Request: unit={} {} {:?}",
            frame.unit_id,
            frame.function(),
            frame.request
        );

        let unit_id = frame.unit_id;
        match frame.request {
            Request::ReadHolding { start, count } => {
                self.check_read(count)?;
                let values = (0..count).map(|i| self.store.read_holding(start + i));
                read_response(unit_id, ModbusFunction::ReadHoldingRegisters, count, values)
            }
            Request::ReadInput { start, count } => {
                self.check_read(count)?;
                let values = (0..count).map(|i| self.store.read_input(start + i));
                read_response(unit_id, ModbusFunction::ReadInputRegisters, count, values)
            }
            Request::WriteSingle { address, value } => {
                self.store.write_holding(address, value);
                Ok(FrameBuilder::echo(frame.fixed_header())?.finish())
            }
            Request::WriteMultiple { start, count, .. } => {
                if !self.config.is_write_within_limits(count) {
                    return Err(ModbusError::invalid_data(format!(
                        "write of {} registers exceeds limit {}",
                        count, self.config.max_write_registers
                    )));
                }
                for (i, value) in frame.request.write_values().enumerate() {
                    self.store.write_holding(start + i as u16, value);
                }
                Ok(FrameBuilder::new(unit_id, ModbusFunction::WriteMultipleRegisters)
                    .register(start)?
                    .register(count)?
                    .finish())
            }
        }
    }

    fn check_read(&self, count: u16) -> ModbusResult<()> {
        if !self.config.is_read_within_limits(count) {
            return Err(ModbusError::invalid_data(format!(
                "read of {} registers exceeds limit {}",
                count, self.config.max_read_registers
            )));
        }
        Ok(())
    }
}

fn read_response(
    unit_id: UnitId,
    function: ModbusFunction,
    count: u16,
    values: impl Iterator<Item = u16>,
) -> ModbusResult<Bytes> {
    let byte_count = u8::try_from(count as usize * 2)
        .map_err(|_| ModbusError::invalid_data(format!("{} registers in one response", count)))?;
    Ok(FrameBuilder::new(unit_id, function)
        .byte(byte_count)?
        .registers(values)?
        .finish())
}
