use rand::Rng;

const APP_ID_LEN: usize = 20;
const HEX_DIGITS: &[u8] = b"0123456789abcdef";

/// Generates a random 20 character lowercase hex identifier.
pub fn generate_app_id() -> String {
    let mut rng = rand::rng();
    (0..APP_ID_LEN)
        .map(|_| HEX_DIGITS[rng.random_range(0..HEX_DIGITS.len())] as char)
        .collect()
}
