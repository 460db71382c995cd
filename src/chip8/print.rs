//! The pretty print implementation for the [`ChipSet`](super::ChipSet) and its display buffer.
//! This implementation was split up into this file for smaller file sizes and higher
//! cohesion.

use super::ChipSet;
use crate::{definitions::memory, devices::DisplayBuffer};
use std::fmt::{self, Write};

/// The amount of bytes shown per memory row
const HEX_PRINT_STEP: usize = 16;

/// Replaces at least one row that only contains zeros
const FILLER: &str = "...";

const PIXEL_ON: char = '█';
const PIXEL_OFF: char = ' ';

const INDENT_FILLAMENT: char = '\t';

/// Will add an indent post processing
fn indent_helper(text: &mut String, indent: usize) {
    for _ in 0..indent {
        text.push(INDENT_FILLAMENT);
    }
}

impl fmt::Display for DisplayBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row
                .iter()
                .map(|&pixel| if pixel == 0 { PIXEL_OFF } else { PIXEL_ON })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Will pretty print the content of the raw memory, consecutive rows of zeros are collapsed.
fn memory_printer(data: &[u8], indent: usize) -> Result<String, fmt::Error> {
    let mut res = String::new();
    let mut last_was_null = false;

    for (row, chunk) in data.chunks(HEX_PRINT_STEP).enumerate() {
        let only_null = chunk.iter().all(|&byte| byte == 0);
        if only_null && last_was_null {
            continue;
        }

        indent_helper(&mut res, indent);
        let from = row * HEX_PRINT_STEP;
        write!(res, "{:#06X} - {:#06X} :", from, from + chunk.len() - 1)?;
        if only_null {
            write!(res, " {}", FILLER)?;
        } else {
            for byte in chunk {
                write!(res, " {:02X}", byte)?;
            }
        }
        res.push('\n');
        last_was_null = only_null;
    }
    Ok(res)
}

impl ChipSet {
    /// Formats the registers, timers and the stack.
    fn registers_print(&self) -> Result<String, fmt::Error> {
        let mut res = String::new();
        writeln!(
            res,
            "PC: {:#06X}  I: {:#06X}  SP: {:#04X}  opcode: {:#06X}",
            self.program_counter,
            self.index_register,
            self.stack.len(),
            self.opcode
        )?;
        writeln!(
            res,
            "delay timer: {}  sound timer: {}  state: {:?}",
            self.delay_timer, self.sound_timer, self.state
        )?;
        for (i, reg) in self.registers.iter().enumerate() {
            write!(res, "V{:X}: {:#04X}", i, reg)?;
            res.push(if i % 8 == 7 { '\n' } else { ' ' });
        }
        write!(res, "stack:")?;
        for entry in self.stack.iter() {
            write!(res, " {:#06X}", entry)?;
        }
        res.push('\n');
        Ok(res)
    }
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.registers_print()?)?;
        writeln!(f, "memory ({} bytes):", memory::SIZE)?;
        write!(f, "{}", memory_printer(&self.memory[..], 1)?)
    }
}
