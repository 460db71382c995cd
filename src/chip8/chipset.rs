use std::convert::TryFrom;

use rand::RngCore;
use tinyvec::ArrayVec;

use crate::{
    definitions::{cpu, display, memory},
    devices::{DisplayBuffer, Keyboard, Tone},
    opcode::{self, ChipOpcodes, Opcode, Opcodes, Operation, ProgramCounter, ProgramCounterStep},
    resources::Rom,
    LoadError, MemoryError, ProcessError, StackError,
};

/// The execution state of the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Every cycle fetches and executes the next opcode.
    Running,
    /// `FX0A` was executed, cycles only scan the keyboard until a key is pressed, which is then
    /// stored into the register.
    AwaitingKey { register: usize },
}

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet {
    /// all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x1FF` - Chip 8 interpreter (contains font set in emu)
    /// - `0x000-0x04F` - Used for the built in `4x5` pixel font set (`0-F`)
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Box<[u8; memory::SIZE]>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions. In an addition operation, `VF` is the carry flag, while in subtraction, it is
    /// the "no borrow" flag. In the draw instruction `VF` is set upon pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: usize,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: usize,
    /// The stack is only used to store return addresses when subroutines are called. Its length
    /// is the stack pointer.
    pub(super) stack: ArrayVec<[usize; cpu::stack::SIZE]>,
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub(super) delay_timer: u8,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is made.
    pub(super) sound_timer: u8,
    pub(super) display: DisplayBuffer,
    pub(super) keyboard: Keyboard,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
    pub(super) state: State,
}

impl Default for ChipSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ChipSet {
    /// will create a new chipset object with the font set loaded and the program counter at
    /// the program start
    pub fn new() -> Self {
        let mut chip = Self {
            opcode: 0,
            memory: Box::new([0; memory::SIZE]),
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: ArrayVec::new(),
            delay_timer: 0,
            sound_timer: 0,
            display: DisplayBuffer::new(),
            keyboard: Keyboard::new(),
            rng: Box::new(rand::rngs::OsRng),
            state: State::Running,
        };
        chip.load_fontset();
        chip
    }

    /// Will create a chipset with the given rom already loaded.
    pub fn with_rom(rom: &Rom) -> Result<Self, LoadError> {
        let mut chip = Self::new();
        chip.load_rom(rom)?;
        Ok(chip)
    }

    /// Will put the chipset back into its power on state, the random number generator is kept.
    pub fn reset(&mut self) {
        self.opcode = 0;
        self.memory.iter_mut().for_each(|byte| *byte = 0);
        self.registers = [0; cpu::register::SIZE];
        self.index_register = 0;
        self.program_counter = cpu::PROGRAM_COUNTER;
        self.stack.clear();
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.display.clear();
        self.keyboard.reset();
        self.state = State::Running;
        self.load_fontset();
        log::info!("chipset reset");
    }

    fn load_fontset(&mut self) {
        let location = display::fontset::LOCATION;
        self.memory[location..(location + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);
    }

    /// Will copy the program into memory at the program start. A program that does not fit is
    /// rejected and the memory stays untouched.
    pub fn load(&mut self, data: &[u8]) -> Result<(), LoadError> {
        if data.len() > cpu::PROGRAM_MAX_SIZE {
            return Err(LoadError::ProgramTooLarge {
                size: data.len(),
                max: cpu::PROGRAM_MAX_SIZE,
            });
        }
        self.memory[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + data.len())]
            .copy_from_slice(data);
        log::info!("loaded program with {} bytes", data.len());
        Ok(())
    }

    /// Will load the data of the given rom.
    pub fn load_rom(&mut self, rom: &Rom) -> Result<(), LoadError> {
        log::debug!("loading rom '{}'", rom.get_name());
        self.load(rom.get_data())
    }

    /// Replaces the random number generator used by `CXNN`.
    pub fn set_rng(&mut self, rng: Box<dyn RngCore + Send>) {
        self.rng = rng;
    }

    /// will get the next opcode from memory
    pub(super) fn set_opcode(&mut self) -> Result<(), ProcessError> {
        // will build the opcode given from the pointer
        self.opcode = opcode::build_opcode(&self.memory[..], self.program_counter)?;
        Ok(())
    }

    /// will advance the program by a single step
    ///
    /// While awaiting a key press no opcode is fetched, instead the keyboard is scanned.
    /// On any error the program counter stays at the failing instruction.
    pub fn next(&mut self) -> Result<Operation, ProcessError> {
        if let State::AwaitingKey { register } = self.state {
            return Ok(self.await_key(register));
        }

        // get next opcode
        self.set_opcode()?;
        log::debug!("{:#06X} at {:#05X}", self.opcode, self.program_counter);
        let opcode = Opcodes::try_from(self.opcode)?;
        // run the opcode
        self.calc(&opcode)
    }

    /// Checks the keyboard for a pressed key, on success the key is stored in the given register
    /// and the execution continues.
    pub(super) fn await_key(&mut self, register: usize) -> Operation {
        match self.keyboard.first_pressed() {
            Some(key) => {
                log::debug!("key {:#X} pressed, stored into V{:X}", key, register);
                self.registers[register] = key as u8;
                self.state = State::Running;
                self.step(ProgramCounterStep::Next);
                Operation::None
            }
            None => {
                self.state = State::AwaitingKey { register };
                Operation::Wait
            }
        }
    }

    /// Moves the program counter past the current instruction, used to step over an unknown
    /// opcode.
    pub fn skip(&mut self) {
        self.step(ProgramCounterStep::Next);
    }

    /// Will count both timers down by one, call this at the timer rate.
    ///
    /// Returns `Some(Tone::Stop)` exactly when the sound timer goes from one to zero.
    pub fn tick(&mut self) -> Option<Tone> {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        match self.sound_timer {
            0 => None,
            1 => {
                self.sound_timer = 0;
                log::trace!("sound timer expired");
                Some(Tone::Stop)
            }
            _ => {
                self.sound_timer -= 1;
                None
            }
        }
    }

    /// Will write keyboard data into interncal keyboard representation.
    pub fn set_keyboard(&mut self, keys: &[bool]) {
        // copy_from_slice checks the keys lenght during copy
        self.keyboard.set_mult(keys);
    }

    /// Will set the value of the given key
    pub fn set_key(&mut self, key: usize, to: bool) {
        self.keyboard.set_key(key, to)
    }

    /// Will toggle the given key
    pub fn toggle_key(&mut self, key: usize) {
        self.keyboard.toggle_key(key)
    }

    /// Will get the current state of the keyboard
    pub fn get_keyboard(&self) -> &[bool] {
        self.keyboard.get_keys()
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.sound_timer
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.delay_timer
    }

    /// Whether a tone should currently play.
    pub fn is_sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    pub fn get_display(&self) -> &DisplayBuffer {
        &self.display
    }

    /// Whether the display changed since the last [`clear_redraw`](Self::clear_redraw).
    pub fn needs_redraw(&self) -> bool {
        self.display.is_dirty()
    }

    /// Called by the renderer after it consumed the display.
    pub fn clear_redraw(&mut self) {
        self.display.clear_dirty()
    }

    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn get_index_register(&self) -> usize {
        self.index_register
    }

    pub fn get_program_counter(&self) -> usize {
        self.program_counter
    }

    pub fn get_stack_pointer(&self) -> usize {
        self.stack.len()
    }

    pub fn get_memory(&self) -> &[u8] {
        &self.memory[..]
    }

    pub fn get_opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn get_state(&self) -> State {
        self.state
    }

    /// Will push the current pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: usize) -> Result<(), StackError> {
        if self.stack.len() == self.stack.capacity() {
            Err(StackError::Overflow)
        } else {
            self.stack.push(pointer);
            Ok(())
        }
    }

    /// Will pop from the stack
    pub(super) fn pop_stack(&mut self) -> Result<usize, StackError> {
        self.stack.pop().ok_or(StackError::Underflow)
    }

    /// Returns an error if `len` bytes starting at `address` do not fit into memory.
    pub(super) fn check_memory(&self, address: usize, len: usize) -> Result<(), MemoryError> {
        if address + len > memory::SIZE {
            Err(MemoryError::OutOfBounds { address, len })
        } else {
            Ok(())
        }
    }
}

impl ProgramCounter for ChipSet {
    fn step(&mut self, step: ProgramCounterStep) {
        self.program_counter = if let ProgramCounterStep::Jump(_) = step {
            step.step()
        } else {
            self.program_counter + step.step()
        }
    }
}
