//! Opcode abstractions, functionality and constants.
use std::convert::TryFrom;

use crate::{devices::Tone, OpcodeError, ProcessError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a nibble
const NIBBLE: u16 = 0x4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::OpcodeError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let pointer = 3;
/// # let err = OpcodeError::MemoryInvalid {pointer, len: SPLIT_OPCODE.len() };
/// # assert_eq!(Err(err), build_opcode(&SPLIT_OPCODE, pointer));
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, OpcodeError> {
    // controlling that there is no illegal access here
    if pointer + 1 < data.len() {
        Ok(Opcode::from_be_bytes([data[pointer], data[pointer + 1]]))
    } else {
        Err(OpcodeError::MemoryInvalid {
            pointer,
            len: data.len(),
        })
    }
}

/// Named bit fields of an opcode.
///
/// For the opcode `0xDXYN`:
/// - `op` is `D`, the instruction family
/// - `x` and `y` are register indices
/// - `n`, `nn` and `nnn` are the lowest 4, 8 and 12 bits
pub trait OpcodeTrait {
    /// Bits 15 to 12.
    ///
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.op(), 0x1);
    /// ```
    fn op(&self) -> usize;

    /// Bits 11 to 8.
    ///
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.x(), 0xE);
    /// ```
    fn x(&self) -> usize;

    /// Bits 7 to 4.
    ///
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.y(), 0xD);
    /// ```
    fn y(&self) -> usize;

    /// Bits 3 to 0.
    ///
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.n(), 0xA);
    /// ```
    fn n(&self) -> usize;

    /// Bits 7 to 0.
    ///
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.nn(), 0xDA);
    /// ```
    fn nn(&self) -> u8;

    /// Bits 11 to 0.
    ///
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.nnn(), 0xEDA);
    /// ```
    fn nnn(&self) -> usize;

    /// this is an opcode extractor for the opcode type `TXYT`
    fn xy(&self) -> (usize, usize) {
        (self.x(), self.y())
    }

    /// this is an opcode extractor for the opcode type `TXNN`
    fn xnn(&self) -> (usize, u8) {
        (self.x(), self.nn())
    }

    /// this is an opcode extractor for the opcode type `TXYN`
    ///
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xyn(), (0xE, 0xD, 0xA));
    /// ```
    fn xyn(&self) -> (usize, usize, usize) {
        (self.x(), self.y(), self.n())
    }
}

impl OpcodeTrait for Opcode {
    fn op(&self) -> usize {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE)) as usize
    }

    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE)) as usize
    }

    fn y(&self) -> usize {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        ((self & MASK) >> NIBBLE) as usize
    }

    fn n(&self) -> usize {
        (self & OPCODE_MASK_000F) as usize
    }

    fn nn(&self) -> u8 {
        (self & OPCODE_MASK_00FF) as u8
    }

    fn nnn(&self) -> usize {
        (self & OPCODE_MASK_0FFF) as usize
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take.
pub enum ProgramCounterStep {
    /// Will not change the program counter
    None,
    /// Will move the program counter to the next instruction
    Next,
    /// Will skip the next instruction
    Skip,
    /// Will simply move the program counter to the given location.
    Jump(usize),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Maps the relative steps to the corresponding movement distance, a jump maps to its target.
    #[inline]
    pub fn step(&self) -> usize {
        use crate::definitions::memory::opcodes::SIZE;
        match *self {
            ProgramCounterStep::Next => SIZE,
            ProgramCounterStep::Skip => 2 * SIZE,
            ProgramCounterStep::None => 0,
            ProgramCounterStep::Jump(pointer) => pointer,
        }
    }
}

/// Implements the conversion of a sub opcode field into its enum.
macro_rules! impl_sub_opcode {
    ($type_name:ty : $type_from:ty : $( $key:literal => $val:expr ),+ $(,)? ) => {
        impl TryFrom<$type_from> for $type_name {
            type Error = ();

            fn try_from(value: $type_from) -> Result<Self, Self::Error> {
                match value {
                    $(
                        $key => Ok($val),
                    )+
                    _ => Err(()),
                }
            }
        }
    };
}

/// Implements the field extraction for the simple opcode layouts.
macro_rules! impl_fields {
    (nnn: $( $type_name:ident ),+) => {
        $(
            impl From<Opcode> for $type_name {
                fn from(value: Opcode) -> Self {
                    Self { nnn: value.nnn() }
                }
            }
        )+
    };
    (xnn: $( $type_name:ident ),+) => {
        $(
            impl From<Opcode> for $type_name {
                fn from(value: Opcode) -> Self {
                    let (x, nn) = value.xnn();
                    Self { x, nn }
                }
            }
        )+
    };
    (xy: $( $type_name:ident ),+) => {
        $(
            impl From<Opcode> for $type_name {
                fn from(value: Opcode) -> Self {
                    let (x, y) = value.xy();
                    Self { x, y }
                }
            }
        )+
    };
}

/// `00E0` and `00EE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    /// Clears the display
    Clear,
    /// Returns from the subroutine
    Return,
}

impl_sub_opcode!(System : Opcode :
    0x00E0 => System::Clear,
    0x00EE => System::Return,
);

/// `1NNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jump {
    pub nnn: usize,
}

/// `2NNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Call {
    pub nnn: usize,
}

/// `3XNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipEqualConst {
    pub x: usize,
    pub nn: u8,
}

/// `4XNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipNotEqualConst {
    pub x: usize,
    pub nn: u8,
}

/// `5XY0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipEqualRegister {
    pub x: usize,
    pub y: usize,
}

/// `6XNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadConst {
    pub x: usize,
    pub nn: u8,
}

/// `7XNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddConst {
    pub x: usize,
    pub nn: u8,
}

/// The sub operations of the `8XYN` family, selected by `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOpcode {
    /// `8XY0` - `Vx = Vy`
    Assign,
    /// `8XY1` - `Vx |= Vy`
    Or,
    /// `8XY2` - `Vx &= Vy`
    And,
    /// `8XY3` - `Vx ^= Vy`
    Xor,
    /// `8XY4` - `Vx += Vy` with carry
    Add,
    /// `8XY5` - `Vx -= Vy` with no borrow flag
    Sub,
    /// `8XY6` - `Vx >>= 1`
    ShiftRight,
    /// `8XY7` - `Vx = Vy - Vx` with no borrow flag
    SubReversed,
    /// `8XYE` - `Vx <<= 1`
    ShiftLeft,
}

impl_sub_opcode!(ArithmeticOpcode : usize :
    0x0 => ArithmeticOpcode::Assign,
    0x1 => ArithmeticOpcode::Or,
    0x2 => ArithmeticOpcode::And,
    0x3 => ArithmeticOpcode::Xor,
    0x4 => ArithmeticOpcode::Add,
    0x5 => ArithmeticOpcode::Sub,
    0x6 => ArithmeticOpcode::ShiftRight,
    0x7 => ArithmeticOpcode::SubReversed,
    0xE => ArithmeticOpcode::ShiftLeft,
);

/// `8XYN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arithmetic {
    pub ops: ArithmeticOpcode,
    pub x: usize,
    pub y: usize,
}

/// `9XY0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkipNotEqualRegister {
    pub x: usize,
    pub y: usize,
}

/// `ANNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadIndex {
    pub nnn: usize,
}

/// `BNNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpOffset {
    pub nnn: usize,
}

/// `CXNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Random {
    pub x: usize,
    pub nn: u8,
}

/// `DXYN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub x: usize,
    pub y: usize,
    pub n: usize,
}

/// The sub operations of the `EXNN` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOpcode {
    /// `EX9E`
    Pressed,
    /// `EXA1`
    NotPressed,
}

impl_sub_opcode!(KeyOpcode : u8 :
    0x9E => KeyOpcode::Pressed,
    0xA1 => KeyOpcode::NotPressed,
);

/// `EXNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub ops: KeyOpcode,
    pub x: usize,
}

/// The sub operations of the `FXNN` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOpcode {
    /// `FX07`
    GetDelayTimer,
    /// `FX0A`
    AwaitKeyPress,
    /// `FX15`
    SetDelayTimer,
    /// `FX18`
    SetSoundTimer,
    /// `FX1E`
    AddVxToI,
    /// `FX29`
    SetIToSprite,
    /// `FX33`
    StoreBCD,
    /// `FX55`
    StoreV0ToVx,
    /// `FX65`
    FillV0ToVx,
}

impl_sub_opcode!(MiscOpcode : u8 :
    0x07 => MiscOpcode::GetDelayTimer,
    0x0A => MiscOpcode::AwaitKeyPress,
    0x15 => MiscOpcode::SetDelayTimer,
    0x18 => MiscOpcode::SetSoundTimer,
    0x1E => MiscOpcode::AddVxToI,
    0x29 => MiscOpcode::SetIToSprite,
    0x33 => MiscOpcode::StoreBCD,
    0x55 => MiscOpcode::StoreV0ToVx,
    0x65 => MiscOpcode::FillV0ToVx,
);

/// `FXNN`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misc {
    pub ops: MiscOpcode,
    pub x: usize,
}

impl_fields!(nnn: Jump, Call, LoadIndex, JumpOffset);
impl_fields!(xnn: SkipEqualConst, SkipNotEqualConst, LoadConst, AddConst, Random);
impl_fields!(xy: SkipEqualRegister, SkipNotEqualRegister);

/// A fully decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcodes {
    System(System),
    Jump(Jump),
    Call(Call),
    SkipEqualConst(SkipEqualConst),
    SkipNotEqualConst(SkipNotEqualConst),
    SkipEqualRegister(SkipEqualRegister),
    LoadConst(LoadConst),
    AddConst(AddConst),
    Arithmetic(Arithmetic),
    SkipNotEqualRegister(SkipNotEqualRegister),
    LoadIndex(LoadIndex),
    JumpOffset(JumpOffset),
    Random(Random),
    Draw(Draw),
    Key(Key),
    Misc(Misc),
}

impl TryFrom<Opcode> for Opcodes {
    type Error = OpcodeError;

    /// Decodes the given word.
    ///
    /// ```rust
    /// # use std::convert::TryFrom;
    /// # use chip::{opcode::*, OpcodeError};
    /// assert_eq!(Opcodes::try_from(0x00E0), Ok(Opcodes::System(System::Clear)));
    /// assert_eq!(Opcodes::try_from(0x0001), Err(OpcodeError::UnknownOpcode(0x0001)));
    /// ```
    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        let unknown = |_| OpcodeError::UnknownOpcode(value);
        let res = match value.op() {
            0x0 => Opcodes::System(System::try_from(value).map_err(unknown)?),
            0x1 => Opcodes::Jump(value.into()),
            0x2 => Opcodes::Call(value.into()),
            0x3 => Opcodes::SkipEqualConst(value.into()),
            0x4 => Opcodes::SkipNotEqualConst(value.into()),
            0x5 if value.n() == 0 => Opcodes::SkipEqualRegister(value.into()),
            0x6 => Opcodes::LoadConst(value.into()),
            0x7 => Opcodes::AddConst(value.into()),
            0x8 => {
                let (x, y, n) = value.xyn();
                let ops = ArithmeticOpcode::try_from(n).map_err(unknown)?;
                Opcodes::Arithmetic(Arithmetic { ops, x, y })
            }
            0x9 if value.n() == 0 => Opcodes::SkipNotEqualRegister(value.into()),
            0xA => Opcodes::LoadIndex(value.into()),
            0xB => Opcodes::JumpOffset(value.into()),
            0xC => Opcodes::Random(value.into()),
            0xD => {
                let (x, y, n) = value.xyn();
                Opcodes::Draw(Draw { x, y, n })
            }
            0xE => {
                let (x, nn) = value.xnn();
                let ops = KeyOpcode::try_from(nn).map_err(unknown)?;
                Opcodes::Key(Key { ops, x })
            }
            0xF => {
                let (x, nn) = value.xnn();
                let ops = MiscOpcode::try_from(nn).map_err(unknown)?;
                Opcodes::Misc(Misc { ops, x })
            }
            _ => return Err(OpcodeError::UnknownOpcode(value)),
        };
        Ok(res)
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter forward by a step.
    fn step(&mut self, step: ProgramCounterStep);
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents a command from the interpreter up to the driver.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The interpreter waits for the next key press
    Wait,
    /// The display buffer was changed
    Draw,
    /// The sound timer crossed between zero and non zero
    Sound(Tone),
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter) trait, as the
/// step returned by each handler is applied through it.
pub trait ChipOpcodes: ProgramCounter {
    /// will calculate the programs step by a single step
    fn calc(&mut self, opcode: &Opcodes) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let step_op = |(step, op)| {
            operation = op;
            step
        };

        let step = match opcode {
            Opcodes::System(opcode) => self.system(opcode).map(step_op),
            Opcodes::Jump(opcode) => self.jump(opcode),
            Opcodes::Call(opcode) => self.call(opcode),
            Opcodes::SkipEqualConst(opcode) => self.skip_equal_const(opcode),
            Opcodes::SkipNotEqualConst(opcode) => self.skip_not_equal_const(opcode),
            Opcodes::SkipEqualRegister(opcode) => self.skip_equal_register(opcode),
            Opcodes::LoadConst(opcode) => self.load_const(opcode),
            Opcodes::AddConst(opcode) => self.add_const(opcode),
            Opcodes::Arithmetic(opcode) => self.arithmetic(opcode),
            Opcodes::SkipNotEqualRegister(opcode) => self.skip_not_equal_register(opcode),
            Opcodes::LoadIndex(opcode) => self.load_index(opcode),
            Opcodes::JumpOffset(opcode) => self.jump_offset(opcode),
            Opcodes::Random(opcode) => self.random(opcode),
            Opcodes::Draw(opcode) => self.draw(opcode).map(step_op),
            Opcodes::Key(opcode) => self.key(opcode),
            Opcodes::Misc(opcode) => self.misc(opcode).map(step_op),
        }?;

        self.step(step);
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn system(&mut self, opcode: &System) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn jump(&self, opcode: &Jump) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call(&mut self, opcode: &Call) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    fn skip_equal_const(&self, opcode: &SkipEqualConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn skip_not_equal_const(
        &self,
        opcode: &SkipNotEqualConst,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    fn skip_equal_register(
        &self,
        opcode: &SkipEqualRegister,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn load_const(&mut self, opcode: &LoadConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add_const(&mut self, opcode: &AddConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `8XY0` - Assign   - `Vx=Vy`               - Sets `VX` to the value of `VY`.
    /// - `8XY1` - BitOp    - `Vx=Vx|Vy`            - Sets `VX` to `VX` or `VY`.
    /// - `8XY2` - BitOp    - `Vx=Vx&Vy`            - Sets `VX` to `VX` and `VY`.
    /// - `8XY3` - BitOp    - `Vx=Vx^Vy`            - Sets `VX` to `VX` xor `VY`.
    /// - `8XY4` - Math     - `Vx += Vy`            - Adds `VY` to `VX`. `VF` is set to `1` when there's a carry, and to `0` when there isn't.
    /// - `8XY5` - Math     - `Vx -= Vy`            - `VY` is subtracted from `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XY6` - BitOp    - `Vx>>=1`              - Stores the least significant bit of `VX` in `VF` and then shifts `VX` to the right by `1`.
    /// - `8XY7` - Math     - `Vx=Vy-Vx`            - Sets `VX` to `VY` minus `VX`. `VF` is set to `0` when there's a borrow, and `1` when there isn't.
    /// - `8XYE` - BitOp    - `Vx<<=1`              - Stores the most significant bit of `VX` in `VF` and then shifts `VX` to the left by `1`.
    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError>;

    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_not_equal_register(
        &self,
        opcode: &SkipNotEqualRegister,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn load_index(&mut self, opcode: &LoadIndex) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_offset(&self, opcode: &JumpOffset) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random byte and `NN`.
    fn random(&mut self, opcode: &Random) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws an `8` by `N` sprite read from `I` at
    /// `(VX, VY)`, `VF` is set to `1` if any set pixel is flipped off, `0` otherwise.
    fn draw(&mut self, opcode: &Draw) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key(&self, opcode: &Key) -> Result<ProgramCounterStep, ProcessError>;

    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`, `VF` flags leaving the 12 bit range.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the font glyph of `VX`.
    /// - `FX33` - BCD      - Stores the decimal digits of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` at `I`, then `I += X + 1`.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` from `I`, then `I += X + 1`.
    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError>;
}
