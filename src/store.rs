//! Holding and input register banks
//!
//! Both banks are sparse maps over the full 16-bit address space. Addresses
//! that were never set read as zero; a holding register comes into existence
//! on its first write.
//!
//! The store is owned by the [`FrameEngine`](crate::engine::FrameEngine) and
//! is only touched from the single task that processes datagrams, so no
//! interior locking is used.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ModbusError, ModbusResult};
use crate::register_map::{self, RegisterDef, RegisterKind, DRIVE_REGISTERS};

/// Register banks of one simulated device
#[derive(Debug, Clone, Default)]
pub struct RegisterStore {
    holding: HashMap<u16, u16>,
    input: HashMap<u16, u16>,
}

impl RegisterStore {
    /// Create an empty store: every register reads as zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store loaded with the drive's power-on table
    pub fn with_drive_defaults() -> Self {
        Self::from_table(DRIVE_REGISTERS)
    }

    /// Create a store loaded from an arbitrary table
    pub fn from_table(table: &[RegisterDef]) -> Self {
        let mut store = Self::new();
        store.load(table);
        store
    }

    /// Load the drive's power-on table
    pub fn initialize(&mut self) {
        self.load(DRIVE_REGISTERS);
    }

    fn load(&mut self, table: &[RegisterDef]) {
        for def in table {
            match def.kind {
                RegisterKind::Holding => self.holding.insert(def.address, def.value),
                RegisterKind::Input => self.input.insert(def.address, def.value),
            };
        }
        debug!(
            "Register store loaded: {} holding, {} input",
            self.holding.len(),
            self.input.len()
        );
    }

    /// Read a holding register, zero if never set
    #[inline]
    pub fn read_holding(&self, address: u16) -> u16 {
        self.holding.get(&address).copied().unwrap_or(0)
    }

    /// Read an input register, zero if never set
    #[inline]
    pub fn read_input(&self, address: u16) -> u16 {
        self.input.get(&address).copied().unwrap_or(0)
    }

    /// Set or overwrite a holding register
    #[inline]
    pub fn write_holding(&mut self, address: u16, value: u16) {
        self.holding.insert(address, value);
    }

    /// Seed an input register.
    ///
    /// Input registers are read only from the network side; this exists for
    /// setting up the device before it starts serving.
    pub fn set_input(&mut self, address: u16, value: u16) {
        self.input.insert(address, value);
    }

    /// Override one entry of the drive table by name, in whichever bank it
    /// lives
    pub fn set_named(&mut self, name: &str, value: u16) -> ModbusResult<()> {
        let def = register_map::find(name)
            .ok_or_else(|| ModbusError::configuration(format!("Unknown register {}", name)))?;
        match def.kind {
            RegisterKind::Holding => self.write_holding(def.address, value),
            RegisterKind::Input => self.set_input(def.address, value),
        }
        debug!("{} ({:?} {}) = {}", def.name, def.kind, def.address, value);
        Ok(())
    }

    /// Number of defined holding registers
    pub fn holding_len(&self) -> usize {
        self.holding.len()
    }

    /// Number of defined input registers
    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Defined holding registers sorted by address
    pub fn holding_snapshot(&self) -> Vec<(u16, u16)> {
        let mut regs: Vec<_> = self.holding.iter().map(|(&a, &v)| (a, v)).collect();
        regs.sort_unstable_by_key(|&(address, _)| address);
        regs
    }
}
