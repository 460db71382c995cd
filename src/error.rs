use thiserror::Error;

use crate::opcode::Opcode;

#[derive(Error, Debug, PartialEq, Clone)]
pub enum ProcessError {
    #[error("Invalid opcode state '{0}'.")]
    Opcode(#[from] OpcodeError),
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("Invalid memory access '{0}'.")]
    Memory(#[from] MemoryError),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X?}.")]
    UnknownOpcode(Opcode),
    #[error("Pointer location invalid there can not be an opcode at {pointer}, if data len is {len}")]
    MemoryInvalid { pointer: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Overflow,
    #[error("Stack is empty!")]
    Underflow,
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum MemoryError {
    #[error("Access of {len} bytes at {address:#06X} leaves the memory.")]
    OutOfBounds { address: usize, len: usize },
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum LoadError {
    #[error("The program is {size} bytes long, but only {max} bytes fit into memory.")]
    ProgramTooLarge { size: usize, max: usize },
}

/// Errors while reading a program from storage.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Unable to read the program '{0}'.")]
    Io(#[from] std::io::Error),
    #[error("Unable to extract the program '{0}'.")]
    Zip(#[from] zip::result::ZipError),
    #[error("{0}")]
    Load(#[from] LoadError),
}
