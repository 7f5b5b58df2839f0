//! Random secret generation for `security` variables.

use composenv_common::constants::GENERATED_PASSWORD_LENGTH;
use rand::Rng;
use rand::seq::SliceRandom;

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
// `$` is left out so a generated value never reads as a variable reference.
const SYMBOLS: &[u8] = b"!@#%^&*()_+-=";

fn pick(rng: &mut impl Rng, set: &[u8]) -> u8 {
    set[rng.gen_range(0..set.len())]
}

/// Generates a password using the given random source.
///
/// The result has at least one upper-case letter, one lower-case letter,
/// one digit, and one symbol.
#[must_use]
pub fn generate_password_with(rng: &mut impl Rng) -> String {
    let all: Vec<u8> = [UPPER, LOWER, DIGITS, SYMBOLS].concat();
    let mut bytes = vec![
        pick(rng, UPPER),
        pick(rng, LOWER),
        pick(rng, DIGITS),
        pick(rng, SYMBOLS),
    ];
    while bytes.len() < GENERATED_PASSWORD_LENGTH {
        bytes.push(pick(rng, &all));
    }
    bytes.shuffle(rng);
    bytes.into_iter().map(char::from).collect()
}

/// Generates a password from the thread-local random source.
#[must_use]
pub fn generate_password() -> String {
    generate_password_with(&mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_password_has_every_class() {
        for _ in 0..50 {
            let password = generate_password();
            assert_eq!(password.len(), GENERATED_PASSWORD_LENGTH);
            assert!(password.chars().any(|c| c.is_ascii_uppercase()), "got: {password}");
            assert!(password.chars().any(|c| c.is_ascii_lowercase()), "got: {password}");
            assert!(password.chars().any(|c| c.is_ascii_digit()), "got: {password}");
            assert!(
                password.bytes().any(|b| SYMBOLS.contains(&b)),
                "got: {password}"
            );
            assert!(!password.contains('$'));
        }
    }

    #[test]
    fn generated_passwords_differ() {
        assert_ne!(generate_password(), generate_password());
    }

    #[test]
    fn generated_password_passes_password_rule() {
        let password = generate_password();
        assert!(composenv_compose::validate::validate("DB_PASSWORD", &password).is_none());
    }
}
