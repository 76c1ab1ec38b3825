//! OAuth `state` tokens guarding the sign-in callback against CSRF

use rand::Rng;

pub fn generate_state_token() -> String {
    let token: [u8; 32] = rand::rng().random();
    hex::encode(token)
}

pub fn validate_state_token(token: &str, expected: &str) -> bool {
    if token.is_empty() || token.len() != expected.len() {
        return false;
    }
    token
        .bytes()
        .zip(expected.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
