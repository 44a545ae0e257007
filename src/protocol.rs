//! Request decoding for the supported function codes
//!
//! A request datagram is an RTU frame without MBAP header:
//!
//! ```text
//! [unit_id:1][function_code:1][start_addr:2]
//!     + FC03/FC04  [count:2]
//!     + FC06       [value:2]
//!     + FC16       [count:2][byte_count:1][value:2]*count
//! ```
//!
//! Every length the request declares is checked against the bytes actually
//! received before anything is indexed. Anything that does not fit is a
//! [`ModbusError::Frame`].

use std::fmt;

use tracing::debug;

use crate::constants::{
    FC_READ_HOLDING_REGISTERS, FC_READ_INPUT_REGISTERS, FC_WRITE_MULTIPLE_REGISTERS,
    FC_WRITE_SINGLE_REGISTER, FIXED_REQUEST_LEN, MIN_REQUEST_LEN, WRITE_MULTIPLE_HEADER_LEN,
};
use crate::error::{ModbusError, ModbusResult};

/// Unit identifier, echoed back unchanged
pub type UnitId = u8;

/// Function codes served by the simulated device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ModbusFunction {
    ReadHoldingRegisters = FC_READ_HOLDING_REGISTERS,
    ReadInputRegisters = FC_READ_INPUT_REGISTERS,
    WriteSingleRegister = FC_WRITE_SINGLE_REGISTER,
    WriteMultipleRegisters = FC_WRITE_MULTIPLE_REGISTERS,
}

impl ModbusFunction {
    #[inline]
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable name
    pub fn description(self) -> &'static str {
        match self {
            Self::ReadHoldingRegisters => "Read Holding Registers",
            Self::ReadInputRegisters => "Read Input Registers",
            Self::WriteSingleRegister => "Write Single Register",
            Self::WriteMultipleRegisters => "Write Multiple Registers",
        }
    }
}

impl TryFrom<u8> for ModbusFunction {
    type Error = ModbusError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            FC_READ_HOLDING_REGISTERS => Ok(Self::ReadHoldingRegisters),
            FC_READ_INPUT_REGISTERS => Ok(Self::ReadInputRegisters),
            FC_WRITE_SINGLE_REGISTER => Ok(Self::WriteSingleRegister),
            FC_WRITE_MULTIPLE_REGISTERS => Ok(Self::WriteMultipleRegisters),
            _ => Err(ModbusError::invalid_function(code)),
        }
    }
}

impl fmt::Display for ModbusFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FC{:02X} ({})", self.to_u8(), self.description())
    }
}

/// Operation requested by a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request<'a> {
    ReadHolding { start: u16, count: u16 },
    ReadInput { start: u16, count: u16 },
    WriteSingle { address: u16, value: u16 },
    /// `data` holds exactly `count` big-endian register values
    WriteMultiple { start: u16, count: u16, data: &'a [u8] },
}

impl Request<'_> {
    pub fn function(&self) -> ModbusFunction {
        match self {
            Self::ReadHolding { .. } => ModbusFunction::ReadHoldingRegisters,
            Self::ReadInput { .. } => ModbusFunction::ReadInputRegisters,
            Self::WriteSingle { .. } => ModbusFunction::WriteSingleRegister,
            Self::WriteMultiple { .. } => ModbusFunction::WriteMultipleRegisters,
        }
    }

    /// Register values carried by a write multiple request
    pub fn write_values(&self) -> impl Iterator<Item = u16> + '_ {
        let data: &[u8] = match self {
            Self::WriteMultiple { data, .. } => *data,
            _ => &[],
        };
        data.chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
    }
}

/// A decoded request, borrowing from the received datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFrame<'a> {
    pub unit_id: UnitId,
    pub request: Request<'a>,
    raw: &'a [u8],
}

impl<'a> RequestFrame<'a> {
    /// Decode a request. Bytes past the end of the declared request, such as
    /// an unchecked trailing CRC, are ignored.
    pub fn parse(data: &'a [u8]) -> ModbusResult<Self> {
        if data.len() < MIN_REQUEST_LEN {
            return Err(ModbusError::frame(format!(
                "{} bytes, need at least {}",
                data.len(),
                MIN_REQUEST_LEN
            )));
        }

        let unit_id = data[0];
        let function = ModbusFunction::try_from(data[1])?;
        let start = u16::from_be_bytes([data[2], data[3]]);

        let request = match function {
            ModbusFunction::ReadHoldingRegisters | ModbusFunction::ReadInputRegisters => {
                let count = Self::field_u16(data, function)?;
                check_address_span(start, count)?;
                if function == ModbusFunction::ReadHoldingRegisters {
                    Request::ReadHolding { start, count }
                } else {
                    Request::ReadInput { start, count }
                }
            }
            ModbusFunction::WriteSingleRegister => Request::WriteSingle {
                address: start,
                value: Self::field_u16(data, function)?,
            },
            ModbusFunction::WriteMultipleRegisters => {
                if data.len() < WRITE_MULTIPLE_HEADER_LEN {
                    return Err(ModbusError::frame(format!(
                        "{}: {} bytes, need at least {}",
                        function,
                        data.len(),
                        WRITE_MULTIPLE_HEADER_LEN
                    )));
                }
                let count = u16::from_be_bytes([data[4], data[5]]);
                check_address_span(start, count)?;

                let byte_count = data[6] as usize;
                let needed = count as usize * 2;
                if byte_count != needed {
                    // The declared count governs; byte_count is informational.
                    debug!(
                        "{}: byte count {} does not match {} registers",
                        function, byte_count, count
                    );
                }

                let end = WRITE_MULTIPLE_HEADER_LEN + needed;
                if data.len() < end {
                    return Err(ModbusError::frame(format!(
                        "{}: {} registers declared, only {} value bytes present",
                        function,
                        count,
                        data.len() - WRITE_MULTIPLE_HEADER_LEN
                    )));
                }

                Request::WriteMultiple {
                    start,
                    count,
                    data: &data[WRITE_MULTIPLE_HEADER_LEN..end],
                }
            }
        };

        Ok(Self {
            unit_id,
            request,
            raw: data,
        })
    }

    /// Second 16-bit field of a fixed length request (count or value)
    fn field_u16(data: &[u8], function: ModbusFunction) -> ModbusResult<u16> {
        if data.len() < FIXED_REQUEST_LEN {
            return Err(ModbusError::frame(format!(
                "{}: {} bytes, need {}",
                function,
                data.len(),
                FIXED_REQUEST_LEN
            )));
        }
        Ok(u16::from_be_bytes([data[4], data[5]]))
    }

    #[inline]
    pub fn function(&self) -> ModbusFunction {
        self.request.function()
    }

    /// The first six bytes of the request, echoed by FC06 responses
    pub fn fixed_header(&self) -> &'a [u8] {
        &self.raw[..FIXED_REQUEST_LEN.min(self.raw.len())]
    }
}

/// Reject spans that run past the last register address
fn check_address_span(start: u16, count: u16) -> ModbusResult<()> {
    if start as u32 + count as u32 > u16::MAX as u32 + 1 {
        return Err(ModbusError::invalid_data(format!(
            "{} registers from address {} exceed the address space",
            count, start
        )));
    }
    Ok(())
}
