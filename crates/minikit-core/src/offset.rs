use crate::clock::Clock;
use crate::error::{MiniError, Result};

/// Upper bound (exclusive) of the per-message offset, in seconds.
pub const MAX_OFFSET: u64 = 3600;

/// Position-weighted checksum of `message`, reduced into `[0, MAX_OFFSET)`.
///
/// Each UTF-16 code unit `c` at zero-based position `i` contributes
/// `c * (i + 1)`. Code units (not scalar values) are what browser clients
/// hash, so characters outside the BMP count as two surrogate units here too.
/// The running sum is reduced on every step, which gives the same result as
/// reducing once at the end without overflow on long messages.
pub fn offset(message: &str) -> u64 {
    message
        .encode_utf16()
        .enumerate()
        .fold(0u64, |acc, (i, unit)| {
            let weight = (i as u64 + 1) % MAX_OFFSET;
            (acc + u64::from(unit) % MAX_OFFSET * weight) % MAX_OFFSET
        })
}

/// The stored timestamp: current unix seconds plus `offset(message)`.
pub fn optimized_timestamp(clock: &dyn Clock, message: &str) -> Result<u64> {
    let now = clock.now_unix();
    let offset = offset(message);
    now.checked_add(offset)
        .ok_or(MiniError::TimestampOverflow { now, offset })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn empty_message_is_zero() {
        assert_eq!(offset(""), 0);
    }

    #[test]
    fn two_ascii_chars() {
        // 65*1 + 66*2
        assert_eq!(offset("AB"), 197);
    }

    #[test]
    fn single_char_is_its_code() {
        assert_eq!(offset("a"), 97);
    }

    #[test]
    fn wraps_at_modulus() {
        // 'x' (120) * 1 + 'x' * 2 + ... + 'x' * 10 = 120 * 55 = 6600
        let msg = "x".repeat(10);
        assert_eq!(offset(&msg), 6600 % MAX_OFFSET);
    }

    #[test]
    fn order_matters() {
        assert_ne!(offset("AB"), offset("BA"));
        // 66*1 + 65*2
        assert_eq!(offset("BA"), 196);
    }

    #[test]
    fn collisions_exist() {
        // 3600 * 1 is a multiple of the modulus, like the empty string.
        let msg = char::from_u32(3600).unwrap().to_string();
        assert_eq!(offset(&msg), offset(""));
    }

    #[test]
    fn astral_chars_count_as_surrogate_pairs() {
        // U+1F600 encodes as 0xD83D 0xDE00
        let expected = (0xD83D_u64 + 0xDE00 * 2) % MAX_OFFSET;
        assert_eq!(offset("\u{1F600}"), expected);
    }

    #[test]
    fn always_below_modulus() {
        let samples = [
            "hello",
            "¡Mensaje de Prueba!",
            "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz",
            "\u{FFFF}\u{FFFF}\u{FFFF}",
        ];
        for s in samples {
            assert!(offset(s) < MAX_OFFSET, "offset({s:?}) out of range");
        }
        let long = "\u{FFFF}".repeat(100_000);
        assert!(offset(&long) < MAX_OFFSET);
    }

    #[test]
    fn deterministic() {
        assert_eq!(offset("hello"), offset("hello"));
    }

    #[test]
    fn timestamp_adds_offset_to_clock() {
        let clock = FixedClock(1_700_000_000);
        assert_eq!(optimized_timestamp(&clock, "AB").unwrap(), 1_700_000_197);
        assert_eq!(optimized_timestamp(&clock, "").unwrap(), 1_700_000_000);
    }

    #[test]
    fn timestamp_overflow_is_an_error() {
        let clock = FixedClock(u64::MAX);
        let err = optimized_timestamp(&clock, "AB").unwrap_err();
        assert!(matches!(
            err,
            MiniError::TimestampOverflow {
                now: u64::MAX,
                offset: 197
            }
        ));
        // A zero offset still fits.
        assert_eq!(optimized_timestamp(&clock, "").unwrap(), u64::MAX);
    }
}
