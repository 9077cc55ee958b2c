//! Character and string randomizers.
//!
//! Both draw from the alphabetic characters of the configured charset.

use crate::error::RandomizerError;
use rand::seq::SliceRandom;
use rand::Rng;
use specimen_core::{Range, Value};

/// Generate a random character from the alphabet.
pub fn random_char<R: Rng + ?Sized>(rng: &mut R, alphabet: &[char]) -> Result<Value, RandomizerError> {
    alphabet
        .choose(rng)
        .copied()
        .map(Value::Char)
        .ok_or_else(|| RandomizerError::failed("charset has no alphabetic characters"))
}

/// Generate a random string with a length in the given range.
pub fn random_string<R: Rng + ?Sized>(
    rng: &mut R,
    alphabet: &[char],
    length: &Range<usize>,
) -> Result<Value, RandomizerError> {
    if alphabet.is_empty() {
        return Err(RandomizerError::failed(
            "charset has no alphabetic characters",
        ));
    }

    let len = rng.gen_range(length.min..=length.max);
    let value: String = (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
        .collect();
    Ok(Value::String(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use specimen_core::Charset;

    #[test]
    fn test_random_string_length() {
        let mut rng = StdRng::seed_from_u64(42);
        let alphabet = Charset::UsAscii.alphabet();
        let length = Range::new(2, 6);

        for _ in 0..100 {
            let value = random_string(&mut rng, &alphabet, &length).unwrap();
            let s = value.as_str().unwrap();
            assert!((2..=6).contains(&s.chars().count()));
            assert!(s.chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_random_char_from_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);
        let alphabet = Charset::Iso8859_1.alphabet();

        for _ in 0..100 {
            let c = random_char(&mut rng, &alphabet).unwrap().as_char().unwrap();
            assert!(c.is_alphabetic());
            assert!((c as u32) <= 0xFF);
        }
    }

    #[test]
    fn test_empty_alphabet_fails() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(random_char(&mut rng, &[]).is_err());
        assert!(random_string(&mut rng, &[], &Range::new(1, 1)).is_err());
    }
}
