//! Register layout of the simulated two-axis (PAN / TILT) drive
//!
//! Addresses are device configuration, not protocol: the frame engine treats
//! every address the same way. The values below are the power-on contents of
//! the simulated drive.
//!
//! | Range | Bank | Content |
//! |-------|------|---------|
//! | 282-314 | holding | PAN setpoints |
//! | 782-814 | holding | TILT setpoints |
//! | 384, 884 | holding | fault status PAN / TILT |
//! | 445-455 | holding | command registers (write only) |
//! | 412-430 | input | PAN telemetry |
//! | 912-930 | input | TILT telemetry |

/// Register bank a table entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterKind {
    /// Read/write, FC03 / FC06 / FC16
    Holding,
    /// Read only, FC04
    Input,
}

/// One entry of the power-on register table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterDef {
    pub name: &'static str,
    pub kind: RegisterKind,
    pub address: u16,
    pub value: u16,
}

impl RegisterDef {
    const fn holding(name: &'static str, address: u16, value: u16) -> Self {
        Self {
            name,
            kind: RegisterKind::Holding,
            address,
            value,
        }
    }

    const fn input(name: &'static str, address: u16, value: u16) -> Self {
        Self {
            name,
            kind: RegisterKind::Input,
            address,
            value,
        }
    }
}

// ============================================================================
// Holding registers
// ============================================================================

pub const REG_PAN_POSITION: u16 = 282;
pub const REG_PAN_VELOCITY: u16 = 284;
pub const REG_PAN_ACCEL: u16 = 286;
pub const REG_PAN_DECEL: u16 = 288;
pub const REG_PAN_HOME_OFFSET: u16 = 310;
pub const REG_PAN_DEG_CORRECTION: u16 = 312;
pub const REG_PAN_DEG_POS: u16 = 314;

pub const REG_TILT_POSITION: u16 = 782;
pub const REG_TILT_VELOCITY: u16 = 784;
pub const REG_TILT_ACCEL: u16 = 786;
pub const REG_TILT_DECEL: u16 = 788;
pub const REG_TILT_HOME_OFFSET: u16 = 810;
pub const REG_TILT_DEG_CORRECTION: u16 = 812;
pub const REG_TILT_DEG_POS: u16 = 814;

pub const REG_FAULT_STATUS_PAN: u16 = 384;
pub const REG_FAULT_STATUS_TILT: u16 = 884;

pub const REG_CMD_HALT: u16 = 445;
pub const REG_CMD_EMG_STOP: u16 = 446;
pub const REG_CMD_ENABLE: u16 = 448;
pub const REG_CMD_RESET: u16 = 449;
pub const REG_CMD_POS_MOVE: u16 = 451;
pub const REG_CMD_HOME_MOVE_DEG: u16 = 452;
pub const REG_CMD_VEL_FWD: u16 = 453;
pub const REG_CMD_VEL_REV: u16 = 454;
pub const REG_CMD_POS_MOVE_DEG: u16 = 455;

// ============================================================================
// Input registers
// ============================================================================

/// Position in degrees × 100
pub const REG_PAN_POS_DEG: u16 = 412;
/// Velocity × 10
pub const REG_PAN_VEL_SPD: u16 = 414;
/// Distance in mm × 100
pub const REG_PAN_POS_MM: u16 = 416;
pub const REG_PAN_RPM: u16 = 418;
pub const REG_PAN_ACTUAL_CURRENT: u16 = 420;
pub const REG_PAN_IO_STATUS: u16 = 422;
pub const REG_PAN_SYSTEM_STATUS: u16 = 424;
pub const REG_PAN_DCBUS_VOLT: u16 = 426;
pub const REG_PAN_TEMP: u16 = 428;
pub const REG_PAN_FAULT_CODE: u16 = 430;

pub const REG_TILT_POS_DEG: u16 = 912;
pub const REG_TILT_VEL_SPD: u16 = 914;
pub const REG_TILT_POS_MM: u16 = 916;
pub const REG_TILT_RPM: u16 = 918;
pub const REG_TILT_ACTUAL_CURRENT: u16 = 920;
pub const REG_TILT_IO_STATUS: u16 = 922;
pub const REG_TILT_SYSTEM_STATUS: u16 = 924;
pub const REG_TILT_DCBUS_VOLT: u16 = 926;
pub const REG_TILT_TEMP: u16 = 928;
pub const REG_TILT_FAULT_CODE: u16 = 930;

/// Power-on contents of both register banks
pub static DRIVE_REGISTERS: &[RegisterDef] = &[
    // PAN telemetry
    RegisterDef::input("pan_pos_deg", REG_PAN_POS_DEG, 2500),
    RegisterDef::input("pan_vel_spd", REG_PAN_VEL_SPD, 120),
    RegisterDef::input("pan_pos_mm", REG_PAN_POS_MM, 5000),
    RegisterDef::input("pan_rpm", REG_PAN_RPM, 1500),
    RegisterDef::input("pan_actual_current", REG_PAN_ACTUAL_CURRENT, 15),
    RegisterDef::input("pan_io_status", REG_PAN_IO_STATUS, 1),
    RegisterDef::input("pan_system_status", REG_PAN_SYSTEM_STATUS, 0),
    RegisterDef::input("pan_dcbus_volt", REG_PAN_DCBUS_VOLT, 540),
    RegisterDef::input("pan_temp", REG_PAN_TEMP, 45),
    RegisterDef::input("pan_fault_code", REG_PAN_FAULT_CODE, 0),
    // TILT telemetry
    RegisterDef::input("tilt_pos_deg", REG_TILT_POS_DEG, 2800),
    RegisterDef::input("tilt_vel_spd", REG_TILT_VEL_SPD, 90),
    RegisterDef::input("tilt_pos_mm", REG_TILT_POS_MM, 4500),
    RegisterDef::input("tilt_rpm", REG_TILT_RPM, 1300),
    RegisterDef::input("tilt_actual_current", REG_TILT_ACTUAL_CURRENT, 12),
    RegisterDef::input("tilt_io_status", REG_TILT_IO_STATUS, 1),
    RegisterDef::input("tilt_system_status", REG_TILT_SYSTEM_STATUS, 0),
    RegisterDef::input("tilt_dcbus_volt", REG_TILT_DCBUS_VOLT, 520),
    RegisterDef::input("tilt_temp", REG_TILT_TEMP, 48),
    RegisterDef::input("tilt_fault_code", REG_TILT_FAULT_CODE, 0),
    // PAN setpoints
    RegisterDef::holding("pan_position", REG_PAN_POSITION, 1000),
    RegisterDef::holding("pan_velocity", REG_PAN_VELOCITY, 100),
    RegisterDef::holding("pan_accel", REG_PAN_ACCEL, 50),
    RegisterDef::holding("pan_decel", REG_PAN_DECEL, 50),
    RegisterDef::holding("pan_home_offset", REG_PAN_HOME_OFFSET, 0),
    RegisterDef::holding("pan_deg_correction", REG_PAN_DEG_CORRECTION, 0),
    RegisterDef::holding("pan_deg_pos", REG_PAN_DEG_POS, 0),
    // TILT setpoints
    RegisterDef::holding("tilt_position", REG_TILT_POSITION, 2000),
    RegisterDef::holding("tilt_velocity", REG_TILT_VELOCITY, 80),
    RegisterDef::holding("tilt_accel", REG_TILT_ACCEL, 40),
    RegisterDef::holding("tilt_decel", REG_TILT_DECEL, 40),
    RegisterDef::holding("tilt_home_offset", REG_TILT_HOME_OFFSET, 0),
    RegisterDef::holding("tilt_deg_correction", REG_TILT_DEG_CORRECTION, 0),
    RegisterDef::holding("tilt_deg_pos", REG_TILT_DEG_POS, 0),
    // Fault status
    RegisterDef::holding("fault_status_pan", REG_FAULT_STATUS_PAN, 0),
    RegisterDef::holding("fault_status_tilt", REG_FAULT_STATUS_TILT, 0),
    // Commands
    RegisterDef::holding("cmd_halt", REG_CMD_HALT, 0),
    RegisterDef::holding("cmd_emg_stop", REG_CMD_EMG_STOP, 0),
    RegisterDef::holding("cmd_enable", REG_CMD_ENABLE, 0),
    RegisterDef::holding("cmd_reset", REG_CMD_RESET, 0),
    RegisterDef::holding("cmd_pos_move", REG_CMD_POS_MOVE, 0),
    RegisterDef::holding("cmd_home_move_deg", REG_CMD_HOME_MOVE_DEG, 0),
    RegisterDef::holding("cmd_vel_fwd", REG_CMD_VEL_FWD, 0),
    RegisterDef::holding("cmd_vel_rev", REG_CMD_VEL_REV, 0),
    RegisterDef::holding("cmd_pos_move_deg", REG_CMD_POS_MOVE_DEG, 0),
];

/// Look up a table entry by name
pub fn find(name: &str) -> Option<&'static RegisterDef> {
    DRIVE_REGISTERS.iter().find(|def| def.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_sizes() {
        let inputs = DRIVE_REGISTERS
            .iter()
            .filter(|d| d.kind == RegisterKind::Input)
            .count();
        let holdings = DRIVE_REGISTERS
            .iter()
            .filter(|d| d.kind == RegisterKind::Holding)
            .count();
        assert_eq!(inputs, 20);
        assert_eq!(holdings, 25);
    }

    #[test]
    fn test_addresses_unique_per_bank() {
        let mut seen = HashSet::new();
        for def in DRIVE_REGISTERS {
            assert!(
                seen.insert((def.kind, def.address)),
                "duplicate {:?} register {}",
                def.kind,
                def.address
            );
        }
    }

    #[test]
    fn test_find() {
        let pan = find("pan_position").unwrap();
        assert_eq!(pan.address, 282);
        assert_eq!(pan.value, 1000);
        assert_eq!(pan.kind, RegisterKind::Holding);

        assert_eq!(find("tilt_temp").unwrap().value, 48);
        assert!(find("coil_0").is_none());
    }
}
