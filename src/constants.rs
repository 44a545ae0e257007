//! Protocol constants for Modbus RTU frames carried in UDP datagrams
//!
//! The frame layout is the serial RTU one (unit id, PDU, CRC) with no MBAP
//! header. Register limits follow the Modbus application protocol:
//! - Maximum RTU ADU size: 256 bytes
//! - Register counts are bounded so a response still fits in one ADU

// ============================================================================
// Frame Size Constants
// ============================================================================

/// Minimum request length: unit id(1) + function code(1) + start address(2)
pub const MIN_REQUEST_LEN: usize = 4;

/// Length of a read request or single write request without CRC:
/// header(4) + count or value(2)
pub const FIXED_REQUEST_LEN: usize = 6;

/// Header length of a write multiple registers request before the values:
/// header(4) + count(2) + byte count(1)
pub const WRITE_MULTIPLE_HEADER_LEN: usize = 7;

/// Length of the trailing CRC in bytes
pub const CRC_LEN: usize = 2;

/// Maximum RTU ADU size
///
/// Unit id(1) + PDU(253) + CRC(2) = 256 bytes. Also the size of the receive
/// buffer, matching the 256 byte datagrams the controller sends.
pub const MAX_ADU_SIZE: usize = 256;

/// Maximum PDU size per Modbus specification
pub const MAX_PDU_SIZE: usize = 253;

// ============================================================================
// Register Operation Limits
// ============================================================================

/// Maximum number of registers for FC03/FC04
///
/// Response PDU: function(1) + byte count(1) + N × 2 ≤ 253 → N ≤ 125
pub const MAX_READ_REGISTERS: u16 = 125;

/// Maximum number of registers for FC16
///
/// Request PDU: function(1) + address(2) + quantity(2) + byte count(1)
/// + N × 2 ≤ 253 → N ≤ 123
pub const MAX_WRITE_REGISTERS: u16 = 123;

// ============================================================================
// Modbus Function Codes
// ============================================================================

/// Read Holding Registers (FC03)
pub const FC_READ_HOLDING_REGISTERS: u8 = 0x03;

/// Read Input Registers (FC04)
pub const FC_READ_INPUT_REGISTERS: u8 = 0x04;

/// Write Single Register (FC06)
pub const FC_WRITE_SINGLE_REGISTER: u8 = 0x06;

/// Write Multiple Registers (FC16)
pub const FC_WRITE_MULTIPLE_REGISTERS: u8 = 0x10;

// ============================================================================
// Network
// ============================================================================

/// Default bind address of the simulator
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:502";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_size_constants() {
        assert_eq!(MIN_REQUEST_LEN, 4);
        assert_eq!(FIXED_REQUEST_LEN, MIN_REQUEST_LEN + 2);
        assert_eq!(WRITE_MULTIPLE_HEADER_LEN, FIXED_REQUEST_LEN + 1);
        assert_eq!(MAX_ADU_SIZE, 1 + MAX_PDU_SIZE + CRC_LEN);
    }

    #[test]
    fn test_register_limits() {
        let read_pdu_size = 1 + 1 + (MAX_READ_REGISTERS as usize * 2);
        assert!(read_pdu_size <= MAX_PDU_SIZE);

        let write_pdu_size = 1 + 2 + 2 + 1 + (MAX_WRITE_REGISTERS as usize * 2);
        assert!(write_pdu_size <= MAX_PDU_SIZE);

        // byte count is a single byte
        assert!(MAX_READ_REGISTERS as usize * 2 <= u8::MAX as usize);
    }
}
