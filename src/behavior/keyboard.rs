//! Keystroke error injection
//!
//! Decides, per character, whether to emit a mistyped neighbor key and
//! whether to correct it, using a static US-QWERTY row-adjacency table.

use phf::phf_map;
use rand::Rng;

/// Physical key rows of a US-QWERTY layout, in left-to-right order
static KEY_ROWS: [&[char]; 4] = [
    &['`', '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', '-', '='],
    &['q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p', '[', ']', '\\'],
    &['a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l', ';', '\''],
    &['z', 'x', 'c', 'v', 'b', 'n', 'm', ',', '.', '/'],
];

/// Static key position map `(row, index)` into [`KEY_ROWS`]
///
/// Compile-time hash map for O(1) lookup without runtime allocation.
static KEY_POSITIONS: phf::Map<char, (u8, u8)> = phf_map! {
    '`' => (0, 0),
    '1' => (0, 1),
    '2' => (0, 2),
    '3' => (0, 3),
    '4' => (0, 4),
    '5' => (0, 5),
    '6' => (0, 6),
    '7' => (0, 7),
    '8' => (0, 8),
    '9' => (0, 9),
    '0' => (0, 10),
    '-' => (0, 11),
    '=' => (0, 12),
    'q' => (1, 0),
    'w' => (1, 1),
    'e' => (1, 2),
    'r' => (1, 3),
    't' => (1, 4),
    'y' => (1, 5),
    'u' => (1, 6),
    'i' => (1, 7),
    'o' => (1, 8),
    'p' => (1, 9),
    '[' => (1, 10),
    ']' => (1, 11),
    '\\' => (1, 12),
    'a' => (2, 0),
    's' => (2, 1),
    'd' => (2, 2),
    'f' => (2, 3),
    'g' => (2, 4),
    'h' => (2, 5),
    'j' => (2, 6),
    'k' => (2, 7),
    'l' => (2, 8),
    ';' => (2, 9),
    '\'' => (2, 10),
    'z' => (3, 0),
    'x' => (3, 1),
    'c' => (3, 2),
    'v' => (3, 3),
    'b' => (3, 4),
    'n' => (3, 5),
    'm' => (3, 6),
    ',' => (3, 7),
    '.' => (3, 8),
    '/' => (3, 9),
};

/// One emitted key of a typing sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStroke {
    /// A literal character key
    Char(char),
    /// The backspace key
    Backspace,
}

/// Pick a same-row neighbor of `ch`, one position to a random side
///
/// Returns `None` for characters outside the table or when the drawn side
/// falls off the row end; callers treat that as "no error injected".
pub fn adjacent_key<R: Rng + ?Sized>(rng: &mut R, ch: char) -> Option<char> {
    let &(row, index) = KEY_POSITIONS.get(&ch.to_ascii_lowercase())?;
    let row_keys = KEY_ROWS[row as usize];

    let offset: isize = if rng.gen_bool(0.5) { 1 } else { -1 };
    let neighbor = index as isize + offset;
    if neighbor < 0 {
        return None;
    }
    row_keys.get(neighbor as usize).copied()
}

/// Emission sequence for one source character
///
/// With probability `error_probability`, a neighboring key is emitted first;
/// then, independently with probability `correction_probability`, a backspace
/// and the correct character follow - otherwise the wrong character stands
/// uncorrected. Characters with no neighbor are emitted directly. Both
/// probabilities must lie in `[0, 1]`.
pub fn keystrokes_for_char<R: Rng + ?Sized>(
    rng: &mut R,
    ch: char,
    error_probability: f64,
    correction_probability: f64,
) -> Vec<KeyStroke> {
    if rng.gen_bool(error_probability) {
        if let Some(wrong) = adjacent_key(rng, ch) {
            let mut strokes = vec![KeyStroke::Char(wrong)];
            if rng.gen_bool(correction_probability) {
                strokes.push(KeyStroke::Backspace);
                strokes.push(KeyStroke::Char(ch));
            }
            return strokes;
        }
    }

    vec![KeyStroke::Char(ch)]
}
