//! One-time-code generation.

use rand::Rng;

/// Generate a numeric OTP of the given length as a string.
/// Leading zeros are allowed, so the code is always exactly `len` digits.
pub fn generate_otp(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| char::from(b'0' + rng.gen_range(0..10))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_length() {
        for len in [4usize, 6, 8] {
            let otp = generate_otp(len);
            assert_eq!(otp.len(), len);
        }
    }

    #[test]
    fn test_otp_is_numeric() {
        let otp = generate_otp(6);
        assert!(otp.chars().all(|c| c.is_ascii_digit()));
    }
}
