use crate::{
    chip8::ChipSet,
    definitions::{cpu, timer},
    devices::{DisplayCommands, KeyboardCommands, SoundCommands},
    opcode::Operation,
    OpcodeError, ProcessError,
};

/// The configuration of the [`Runner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// The amount of cycles executed between two timer ticks.
    pub cycles_per_tick: u64,
    /// Step over unknown opcodes instead of returning the error.
    pub skip_unknown_opcodes: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            cycles_per_tick: cpu::HERTZ / timer::HERTZ,
            skip_unknown_opcodes: false,
        }
    }
}

/// Drives a chipset and its devices, one [`frame`](Runner::frame) per timer tick.
///
/// The caller is responsible for calling `frame` at the timer rate.
pub struct Runner<D, K, S>
where
    D: DisplayCommands,
    K: KeyboardCommands,
    S: SoundCommands,
{
    chip: ChipSet,
    display: D,
    keyboard: K,
    sound: S,
    config: RunnerConfig,
}

impl<D, K, S> Runner<D, K, S>
where
    D: DisplayCommands,
    K: KeyboardCommands,
    S: SoundCommands,
{
    pub fn new(chip: ChipSet, display: D, keyboard: K, sound: S) -> Self {
        Self::with_config(chip, display, keyboard, sound, RunnerConfig::default())
    }

    pub fn with_config(chip: ChipSet, display: D, keyboard: K, sound: S, config: RunnerConfig) -> Self {
        Self {
            chip,
            display,
            keyboard,
            sound,
            config,
        }
    }

    pub fn chip(&self) -> &ChipSet {
        &self.chip
    }

    pub fn chip_mut(&mut self) -> &mut ChipSet {
        &mut self.chip
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Runs the cycles of a single timer period.
    ///
    /// The keyboard is read once at the beginning, the display is only rendered if it changed,
    /// and the timers are ticked at the end. While a key is awaited the remaining cycles of the
    /// frame are dropped.
    pub fn frame(&mut self) -> Result<(), ProcessError> {
        let keys = self.keyboard.get_keyboard();
        self.chip.set_keyboard(&keys);

        for _ in 0..self.config.cycles_per_tick {
            match self.chip.next() {
                Ok(Operation::Wait) => break,
                Ok(Operation::Sound(tone)) => self.sound.tone(tone),
                Ok(Operation::None) | Ok(Operation::Draw) => {}
                Err(ProcessError::Opcode(OpcodeError::UnknownOpcode(opcode)))
                    if self.config.skip_unknown_opcodes =>
                {
                    log::warn!(
                        "skipping unknown opcode {:#06X} at {:#05X}",
                        opcode,
                        self.chip.get_program_counter()
                    );
                    self.chip.skip();
                }
                Err(err) => {
                    log::error!("{}", err);
                    return Err(err);
                }
            }
        }

        if self.chip.needs_redraw() {
            self.display.display(self.chip.get_display());
            self.chip.clear_redraw();
        }

        if let Some(tone) = self.chip.tick() {
            self.sound.tone(tone);
        }
        Ok(())
    }
}
