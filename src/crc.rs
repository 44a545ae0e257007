//! CRC-16/MODBUS checksum
//!
//! Reflected polynomial 0xA001, seed 0xFFFF, no final XOR. On the wire the
//! checksum is sent low byte first.

use crc::{Crc, CRC_16_MODBUS};

use crate::constants::CRC_LEN;
use crate::error::{ModbusError, ModbusResult};

const CRC_MODBUS: Crc<u16> = Crc::<u16>::new(&CRC_16_MODBUS);

/// Compute the checksum of `data`
#[inline]
pub fn crc16(data: &[u8]) -> u16 {
    CRC_MODBUS.checksum(data)
}

/// Append the checksum of the current contents of `frame`, low byte first
#[inline]
pub fn append_crc(frame: &mut Vec<u8>) {
    let crc = crc16(frame);
    frame.extend_from_slice(&crc.to_le_bytes());
}

/// Check the trailing checksum of `frame` and return the bytes it protects
pub fn verify_crc(frame: &[u8]) -> ModbusResult<&[u8]> {
    if frame.len() < CRC_LEN {
        return Err(ModbusError::frame(format!(
            "{} bytes cannot carry a CRC",
            frame.len()
        )));
    }

    let (body, trailer) = frame.split_at(frame.len() - CRC_LEN);
    let actual = u16::from_le_bytes([trailer[0], trailer[1]]);
    let expected = crc16(body);

    if actual != expected {
        return Err(ModbusError::CrcMismatch { expected, actual });
    }
    Ok(body)
}
