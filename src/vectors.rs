#![warn(clippy::pedantic)]
#![deny(unsafe_code)]

use std::fmt::Display;

/// First vector available to remapped hardware interrupts; everything
/// below is reserved for architecture-defined exceptions.
pub const LEGACY_INTERRUPT_BASE: usize = 0x20;
/// One past the highest vector the architecture can dispatch.
pub const MAX_ARCH_INTERRUPTS: usize = 256;

/// Number of rows a full table emission produces.
pub const TABLE_ROWS: usize = MAX_ARCH_INTERRUPTS - LEGACY_INTERRUPT_BASE - 1;

/// Pieces of the registration statement. These name items of the kernel
/// source file the emitted text is spliced into; they are opaque here.
pub const TARGET_ARRAY: &str = "IDT.lock().interrupts";
pub const BASE_CONST: &str = "LEGACY_HARDWARE_INTERRUPTS_BASE";
pub const REGISTRATION_MACRO: &str = "prepare_no_irq_handler!";
pub const HANDLER_NAME: &str = "no_irq_fn";

/// One row of the interrupt table, identified by its 1-based loop index.
/// Only `rows()` constructs these, so the index is always in
/// `1..=TABLE_ROWS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRow(usize);

impl TableRow {
    const fn new(idx: usize) -> Self { Self(idx) }
    /// Loop index; emitted as the offset from the base constant.
    pub const fn idx(self) -> usize { self.0 }
    /// `LEGACY_INTERRUPT_BASE + idx`, the array slot assigned into.
    pub const fn slot(self) -> usize { LEGACY_INTERRUPT_BASE + self.0 }
    /// `LEGACY_INTERRUPT_BASE + idx`, the vector handed to the macro.
    /// Equal to `slot()` for every row; the bases coincide here.
    pub const fn vector(self) -> usize { LEGACY_INTERRUPT_BASE + self.0 }
}

impl Display for TableRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}[{} + {:#x}] = {}({}, {:#x});",
            TARGET_ARRAY,
            BASE_CONST,
            self.idx(),
            REGISTRATION_MACRO,
            HANDLER_NAME,
            self.vector()
        )
    }
}

/// All rows of the table in emission order: `idx` runs from 1 up to, but
/// excluding, `MAX_ARCH_INTERRUPTS - LEGACY_INTERRUPT_BASE`. Vector 0x20
/// itself is skipped; the kernel wires the timer line there by hand.
pub fn rows() -> impl Iterator<Item = TableRow> {
    (1..MAX_ARCH_INTERRUPTS - LEGACY_INTERRUPT_BASE).map(TableRow::new)
}
