use hashbrown::HashMap;

use crate::definitions::{display, keyboard};

/// An edge of the sound output, derived from the sound timer.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Tone {
    /// The sound timer became non zero.
    Start,
    /// The sound timer reached zero.
    Stop,
}

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will display all from the pixels
    fn display(&mut self, pixels: &DisplayBuffer);
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for writing the keyboard data
pub trait KeyboardCommands {
    /// Returns the pressed state of every key of the hex keypad.
    fn get_keyboard(&mut self) -> [bool; keyboard::SIZE];
}

#[cfg_attr(test, mockall::automock)]
/// The trait responsible for the beeper
pub trait SoundCommands {
    fn tone(&mut self, tone: Tone);
}

/// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
/// `(64 x 32)`. Every pixel is stored as a single byte holding either `0` or `1`.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBuffer {
    pixels: Box<[u8; display::RESOLUTION]>,
    dirty: bool,
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self {
            pixels: Box::new([0; display::RESOLUTION]),
            dirty: true,
        }
    }
}

impl DisplayBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pixel at the given position, coordinates wrap around the screen edges.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[Self::index(x, y)]
    }

    /// All pixels in row major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels[..]
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks(display::WIDTH)
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|pixel| *pixel = 0);
        self.dirty = true;
    }

    /// Flips the pixel at the given (wrapped) position and returns `true` if it was turned off.
    pub fn xor(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.pixels[Self::index(x, y)];
        *pixel ^= 1;
        self.dirty = true;
        *pixel == 0
    }

    /// Whether the buffer changed since the renderer last consumed it.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the buffer as consumed.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    fn index(x: usize, y: usize) -> usize {
        (y % display::HEIGHT) * display::WIDTH + (x % display::WIDTH)
    }
}

/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third waits for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Keyboard {
    keys: [bool; keyboard::SIZE],
}

impl Keyboard {
    pub fn new() -> Self {
        Keyboard::default()
    }

    pub fn reset(&mut self) {
        self.keys = [false; keyboard::SIZE];
    }

    pub fn toggle_key(&mut self, key: usize) {
        self.set_key(key, !self.keys[key])
    }

    pub fn set_key(&mut self, key: usize, to: bool) {
        debug_assert!(key < keyboard::SIZE);
        self.keys[key] = to;
    }

    pub fn set_mult(&mut self, keys: &[bool]) {
        assert!(keys.len() == self.keys.len());
        self.keys.copy_from_slice(keys);
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }

    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys[key]
    }

    /// The lowest index of all the pressed keys.
    pub fn first_pressed(&self) -> Option<usize> {
        self.keys.iter().position(|&pressed| pressed)
    }
}

/// Maps host keys onto the hex keypad.
///
/// The default binding places the keypad onto the left block of a qwerty keyboard:
///
/// ```text
/// 1 2 3 4        1 2 3 C
/// q w e r   =>   4 5 6 D
/// a s d f        7 8 9 E
/// z x c v        A 0 B F
/// ```
#[derive(Debug, Clone)]
pub struct KeyMap {
    map: HashMap<char, usize>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let map = keyboard::HOST_LAYOUT
            .iter()
            .flatten()
            .zip(keyboard::LAYOUT.iter().flatten())
            .map(|(&host, &key)| (host, key))
            .collect();
        Self { map }
    }
}

impl KeyMap {
    /// A map without any bindings.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Binds the host key to the keypad key, replacing a previous binding of the host key.
    pub fn insert(&mut self, host: char, key: usize) -> Option<usize> {
        assert!(key < keyboard::SIZE, "There is no keypad key {:#X}.", key);
        self.map.insert(host.to_ascii_lowercase(), key)
    }

    /// Returns the keypad key bound to the host key, ignoring case.
    pub fn get(&self, host: char) -> Option<usize> {
        self.map.get(&host.to_ascii_lowercase()).copied()
    }

    /// Applies a host key event to the keyboard, returns `false` for unbound keys.
    pub fn apply(&self, keyboard: &mut Keyboard, host: char, pressed: bool) -> bool {
        match self.get(host) {
            Some(key) => {
                keyboard.set_key(key, pressed);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_wraps() {
        let mut buffer = DisplayBuffer::new();
        assert!(!buffer.xor(display::WIDTH + 3, display::HEIGHT + 1));
        assert_eq!(buffer.get(3, 1), 1);
        assert!(buffer.xor(3, 1));
        assert_eq!(buffer.get(3, 1), 0);
    }

    #[test]
    fn test_display_dirty() {
        let mut buffer = DisplayBuffer::new();
        assert!(buffer.is_dirty());
        buffer.clear_dirty();
        assert!(!buffer.is_dirty());
        buffer.xor(0, 0);
        assert!(buffer.is_dirty());
        buffer.clear_dirty();
        buffer.clear();
        assert!(buffer.is_dirty());
        assert!(buffer.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_display_rows() {
        let mut buffer = DisplayBuffer::new();
        buffer.xor(5, 2);
        let rows: Vec<_> = buffer.rows().collect();
        assert_eq!(rows.len(), display::HEIGHT);
        assert!(rows.iter().all(|row| row.len() == display::WIDTH));
        assert_eq!(rows[2][5], 1);
    }

    #[test]
    fn test_keyboard() {
        let mut keys = Keyboard::new();
        assert_eq!(keys.first_pressed(), None);

        keys.set_key(0xB, true);
        keys.set_key(0x4, true);
        assert_eq!(keys.first_pressed(), Some(0x4));

        keys.toggle_key(0x4);
        assert!(!keys.is_pressed(0x4));
        assert_eq!(keys.first_pressed(), Some(0xB));

        keys.reset();
        assert_eq!(&[false; keyboard::SIZE], keys.get_keys());
    }

    #[test]
    fn test_default_key_map() {
        let map = KeyMap::default();
        let expected = [
            ('1', 0x1),
            ('4', 0xC),
            ('q', 0x4),
            ('R', 0xD),
            ('s', 0x8),
            ('f', 0xE),
            ('z', 0xA),
            ('x', 0x0),
            ('v', 0xF),
        ];
        for (host, key) in expected {
            assert_eq!(map.get(host), Some(key), "host key {}", host);
        }
        assert_eq!(map.get('p'), None);
    }

    #[test]
    fn test_key_map_apply() {
        let mut map = KeyMap::empty();
        let mut keys = Keyboard::new();
        assert_eq!(map.insert('K', 0x7), None);

        assert!(map.apply(&mut keys, 'k', true));
        assert!(keys.is_pressed(0x7));
        assert!(!map.apply(&mut keys, 'j', true));

        assert!(map.apply(&mut keys, 'k', false));
        assert_eq!(keys.first_pressed(), None);
    }
}
