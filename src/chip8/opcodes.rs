use crate::{
    definitions::{cpu, display, keyboard, memory},
    devices::Tone,
    opcode::{
        AddConst, Arithmetic, ArithmeticOpcode, Call, ChipOpcodes, Draw, Jump, JumpOffset, Key,
        KeyOpcode, LoadConst, LoadIndex, Misc, MiscOpcode, Operation, ProgramCounterStep, Random,
        SkipEqualConst, SkipEqualRegister, SkipNotEqualConst, SkipNotEqualRegister, System,
    },
    ProcessError,
};

use super::ChipSet;

/// The bits of a single sprite row
const SPRITE_WIDTH: usize = 8;

impl ChipOpcodes for ChipSet {
    fn system(&mut self, opcode: &System) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        match opcode {
            System::Clear => {
                // 00E0
                self.display.clear();
                Ok((ProgramCounterStep::Next, Operation::Draw))
            }
            System::Return => {
                // 00EE
                // the call pushed its own address, so continue after it
                let pc = self.pop_stack()?;
                log::debug!("return to {:#05X}", pc);
                Ok((
                    ProgramCounterStep::Jump(pc + ProgramCounterStep::Next.step()),
                    Operation::None,
                ))
            }
        }
    }

    fn jump(&self, opcode: &Jump) -> Result<ProgramCounterStep, ProcessError> {
        // 1NNN
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn call(&mut self, opcode: &Call) -> Result<ProgramCounterStep, ProcessError> {
        // 2NNN
        // pushes the address of the call itself
        self.push_stack(self.program_counter)?;
        log::debug!("call {:#05X} from {:#05X}", opcode.nnn, self.program_counter);
        Ok(ProgramCounterStep::Jump(opcode.nnn))
    }

    fn skip_equal_const(&self, opcode: &SkipEqualConst) -> Result<ProgramCounterStep, ProcessError> {
        // 3XNN
        Ok(ProgramCounterStep::cond(self.registers[opcode.x] == opcode.nn))
    }

    fn skip_not_equal_const(
        &self,
        opcode: &SkipNotEqualConst,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 4XNN
        Ok(ProgramCounterStep::cond(self.registers[opcode.x] != opcode.nn))
    }

    fn skip_equal_register(
        &self,
        opcode: &SkipEqualRegister,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 5XY0
        Ok(ProgramCounterStep::cond(
            self.registers[opcode.x] == self.registers[opcode.y],
        ))
    }

    fn load_const(&mut self, opcode: &LoadConst) -> Result<ProgramCounterStep, ProcessError> {
        // 6XNN
        self.registers[opcode.x] = opcode.nn;
        Ok(ProgramCounterStep::Next)
    }

    fn add_const(&mut self, opcode: &AddConst) -> Result<ProgramCounterStep, ProcessError> {
        // 7XNN
        // let VX overflow, but ignore carry
        self.registers[opcode.x] = self.registers[opcode.x].wrapping_add(opcode.nn);
        Ok(ProgramCounterStep::Next)
    }

    fn arithmetic(&mut self, opcode: &Arithmetic) -> Result<ProgramCounterStep, ProcessError> {
        let Arithmetic { ops, x, y } = *opcode;
        let vx = self.registers[x];
        let vy = self.registers[y];

        // the flag is written before the result, with `X == F` the result wins
        let (res, flag) = match ops {
            ArithmeticOpcode::Assign => (vy, None),
            ArithmeticOpcode::Or => (vx | vy, None),
            ArithmeticOpcode::And => (vx & vy, None),
            ArithmeticOpcode::Xor => (vx ^ vy, None),
            ArithmeticOpcode::Add => {
                let (res, carry) = vx.overflowing_add(vy);
                (res, Some(carry as u8))
            }
            ArithmeticOpcode::Sub => (vx.wrapping_sub(vy), Some((vx >= vy) as u8)),
            ArithmeticOpcode::ShiftRight => (vx >> 1, Some(vx & 1)),
            ArithmeticOpcode::SubReversed => (vy.wrapping_sub(vx), Some((vy >= vx) as u8)),
            ArithmeticOpcode::ShiftLeft => (vx << 1, Some(vx >> 7)),
        };

        if let Some(flag) = flag {
            self.registers[cpu::register::LAST] = flag;
        }
        self.registers[x] = res;
        Ok(ProgramCounterStep::Next)
    }

    fn skip_not_equal_register(
        &self,
        opcode: &SkipNotEqualRegister,
    ) -> Result<ProgramCounterStep, ProcessError> {
        // 9XY0
        Ok(ProgramCounterStep::cond(
            self.registers[opcode.x] != self.registers[opcode.y],
        ))
    }

    fn load_index(&mut self, opcode: &LoadIndex) -> Result<ProgramCounterStep, ProcessError> {
        // ANNN
        self.index_register = opcode.nnn;
        Ok(ProgramCounterStep::Next)
    }

    fn jump_offset(&self, opcode: &JumpOffset) -> Result<ProgramCounterStep, ProcessError> {
        // BNNN
        let v0 = self.registers[0] as usize;
        Ok(ProgramCounterStep::Jump(
            (v0 + opcode.nnn) & memory::ADDRESS_MASK,
        ))
    }

    fn random(&mut self, opcode: &Random) -> Result<ProgramCounterStep, ProcessError> {
        // CXNN
        // using a fill bytes call here, as the trait RngCore does not
        // support random u8.
        let mut rand: [u8; 1] = [0];
        self.rng.fill_bytes(&mut rand);
        self.registers[opcode.x] = opcode.nn & rand[0];
        Ok(ProgramCounterStep::Next)
    }

    fn draw(&mut self, opcode: &Draw) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        // DXYN
        // see https://tobiasvl.github.io/blog/write-a-chip-8-emulator/
        let index = self.index_register;
        self.check_memory(index, opcode.n)?;

        let coorx = self.registers[opcode.x] as usize;
        let coory = self.registers[opcode.y] as usize;

        let mut collision = false;
        for (i, row) in self.memory[index..(index + opcode.n)].iter().enumerate() {
            // the most significant bit is the leftmost pixel
            for j in 0..SPRITE_WIDTH {
                let mask: u8 = 0x80 >> j;
                if row & mask == 0 {
                    continue;
                }
                // every pixel wraps around the screen edges
                collision |= self.display.xor(
                    (coorx + j) % display::WIDTH,
                    (coory + i) % display::HEIGHT,
                );
            }
        }
        self.display.mark_dirty();
        self.registers[cpu::register::LAST] = collision as u8;

        Ok((ProgramCounterStep::Next, Operation::Draw))
    }

    fn key(&self, opcode: &Key) -> Result<ProgramCounterStep, ProcessError> {
        let key = self.registers[opcode.x] as usize % keyboard::SIZE;
        let pressed = self.keyboard.is_pressed(key);
        let step = match opcode.ops {
            // EX9E
            KeyOpcode::Pressed => ProgramCounterStep::cond(pressed),
            // EXA1
            KeyOpcode::NotPressed => ProgramCounterStep::cond(!pressed),
        };
        Ok(step)
    }

    fn misc(&mut self, opcode: &Misc) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        let x = opcode.x;
        let mut op = Operation::None;
        match opcode.ops {
            MiscOpcode::GetDelayTimer => {
                // FX07
                self.registers[x] = self.delay_timer;
            }
            MiscOpcode::AwaitKeyPress => {
                // FX0A
                // the program counter is moved as soon as a key is pressed
                let op = self.await_key(x);
                return Ok((ProgramCounterStep::None, op));
            }
            MiscOpcode::SetDelayTimer => {
                // FX15
                self.delay_timer = self.registers[x];
            }
            MiscOpcode::SetSoundTimer => {
                // FX18
                let value = self.registers[x];
                op = match (self.sound_timer, value) {
                    (0, 0) => Operation::None,
                    (0, _) => Operation::Sound(Tone::Start),
                    (_, 0) => Operation::Sound(Tone::Stop),
                    _ => Operation::None,
                };
                self.sound_timer = value;
            }
            MiscOpcode::AddVxToI => {
                // FX1E
                // VF flags leaving the 12 bit address space
                let res = self.index_register + self.registers[x] as usize;
                self.registers[cpu::register::LAST] = (res > memory::ADDRESS_MASK) as u8;
                self.index_register = res & memory::ADDRESS_MASK;
            }
            MiscOpcode::SetIToSprite => {
                // FX29
                self.index_register = display::fontset::LOCATION
                    + display::fontset::GLYPH_SIZE * self.registers[x] as usize;
            }
            MiscOpcode::StoreBCD => {
                // FX33
                let i = self.index_register;
                self.check_memory(i, 3)?;
                let r = self.registers[x];

                self.memory[i] = r / 100; // 246u8 / 100 => 2
                self.memory[i + 1] = r / 10 % 10; // 246u8 / 10 => 24 % 10 => 4
                self.memory[i + 2] = r % 10; // 246u8 % 10 => 6
            }
            MiscOpcode::StoreV0ToVx => {
                // FX55
                let index = self.index_register;
                self.check_memory(index, x + 1)?;
                self.memory[index..=(index + x)].copy_from_slice(&self.registers[..=x]);
                self.index_register += x + 1;
            }
            MiscOpcode::FillV0ToVx => {
                // FX65
                let index = self.index_register;
                self.check_memory(index, x + 1)?;
                self.registers[..=x].copy_from_slice(&self.memory[index..=(index + x)]);
                self.index_register += x + 1;
            }
        }
        Ok((ProgramCounterStep::Next, op))
    }
}
