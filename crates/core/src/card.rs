//! Membership card numbers and confirmation codes.

use rand::Rng;

/// Generate a random five-digit card number.
///
/// Uniqueness is enforced by the `players` table; callers retry on
/// collision.
pub fn generate_card_number() -> String {
    rand::rng().random_range(10_000..100_000).to_string()
}

/// Generate a confirmation code like `SR-2026-4821`.
pub fn generate_confirmation(prefix: &str, year: i32) -> String {
    let n: u32 = rand::rng().random_range(1_000..10_000);
    format!("{prefix}-{year}-{n}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_numbers_are_five_digits() {
        for _ in 0..100 {
            let card = generate_card_number();
            assert_eq!(card.len(), 5);
            assert!(card.parse::<u32>().unwrap() >= 10_000);
        }
    }

    #[test]
    fn confirmation_codes_carry_prefix_and_year() {
        let code = generate_confirmation("SR", 2026);
        assert!(code.starts_with("SR-2026-"));
        assert_eq!(code.len(), "SR-2026-0000".len());
    }
}
