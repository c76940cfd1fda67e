//! Fallback nickname for configs that do not name one.
//!
//! Produces `relay` followed by four digits (e.g. `relay0421`), which stays
//! within the 9-character limit many networks still enforce.

use rand::RngExt;

const PREFIX: &str = "relay";

pub fn generate_nickname() -> String {
    let mut rng = rand::rng();
    let num: u16 = rng.random_range(0..10_000);
    format!("{}{:04}", PREFIX, num)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_nickname_shape() {
        let nick = generate_nickname();
        assert!(nick.starts_with(PREFIX));
        assert_eq!(nick.len(), 9);
        assert!(nick[PREFIX.len()..].chars().all(|c| c.is_ascii_digit()));
    }
}
