//! Response frame assembly
//!
//! A response is `unit_id, function_code, body..., crc_lo, crc_hi`. The
//! builder accumulates the header and body, then [`FrameBuilder::finish`]
//! appends the CRC over everything written so far.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::debug;

use crate::constants::{CRC_LEN, MAX_ADU_SIZE};
use crate::crc::crc16;
use crate::error::{ModbusError, ModbusResult};
use crate::protocol::{ModbusFunction, UnitId};

/// Response frame builder - fluent API
#[derive(Debug)]
pub struct FrameBuilder {
    buf: BytesMut,
}

impl FrameBuilder {
    /// Start a response with its unit id and function code
    #[inline]
    pub fn new(unit_id: UnitId, function: ModbusFunction) -> Self {
        let mut buf = BytesMut::with_capacity(MAX_ADU_SIZE);
        buf.put_u8(unit_id);
        buf.put_u8(function.to_u8());
        Self { buf }
    }

    /// Start a response that repeats a request header verbatim
    pub fn echo(header: &[u8]) -> ModbusResult<Self> {
        let mut builder = Self {
            buf: BytesMut::with_capacity(MAX_ADU_SIZE),
        };
        builder.reserve(header.len())?;
        builder.buf.put_slice(header);
        Ok(builder)
    }

    fn reserve(&self, additional: usize) -> ModbusResult<()> {
        if self.buf.len() + additional + CRC_LEN > MAX_ADU_SIZE {
            return Err(ModbusError::frame(format!(
                "response would exceed max size: {} + {} + {} > {}",
                self.buf.len(),
                additional,
                CRC_LEN,
                MAX_ADU_SIZE
            )));
        }
        Ok(())
    }

    /// Add a byte
    #[inline]
    pub fn byte(mut self, b: u8) -> ModbusResult<Self> {
        self.reserve(1)?;
        self.buf.put_u8(b);
        Ok(self)
    }

    /// Add a big-endian 16-bit value
    #[inline]
    pub fn register(mut self, value: u16) -> ModbusResult<Self> {
        self.reserve(2)?;
        self.buf.put_u16(value);
        Ok(self)
    }

    /// Add big-endian 16-bit values
    pub fn registers<I>(mut self, values: I) -> ModbusResult<Self>
    where
        I: IntoIterator<Item = u16>,
    {
        for value in values {
            self = self.register(value)?;
        }
        Ok(self)
    }

    /// Bytes written so far, without CRC
    #[inline]
    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Append the CRC and freeze the frame
    pub fn finish(mut self) -> Bytes {
        let crc = crc16(self.as_slice());
        self.buf.put_u16_le(crc);

        debug!(
            "Response built: unit={} FC={:02X} total_len={}",
            self.buf.first().copied().unwrap_or(0),
            self.buf.get(1).copied().unwrap_or(0),
            self.buf.len()
        );

        self.buf.freeze()
    }
}
