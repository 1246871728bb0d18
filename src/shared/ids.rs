use getrandom::getrandom;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_SUFFIX_SPACE: u32 = 36 * 36 * 36 * 36;

/// Client-generated token used for list-key stability in the wizard editors.
/// Tokens are never persisted identity; the backend assigns its own ids.
pub fn generate_client_token(prefix: &str) -> Result<String, String> {
    let now = chrono::Utc::now().timestamp();
    let timestamp = u64::try_from(now)
        .map_err(|_| "client token requires a non-negative timestamp".to_string())?;
    let mut bytes = [0_u8; 4];
    getrandom(&mut bytes)
        .map_err(|err| format!("failed to generate client token randomness: {err}"))?;
    let sample = u32::from_le_bytes(bytes) % TOKEN_SUFFIX_SPACE;
    let ts = base36_encode_u64(timestamp);
    let suffix = base36_encode_fixed_u32(sample, 4);
    Ok(format!("{prefix}-{ts}-{suffix}"))
}

fn base36_encode_u64(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut chars = Vec::new();
    while value > 0 {
        chars.push(BASE36_ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }
    chars.iter().rev().collect()
}

fn base36_encode_fixed_u32(mut value: u32, width: usize) -> String {
    let mut chars = vec!['0'; width];
    for idx in (0..width).rev() {
        chars[idx] = BASE36_ALPHABET[(value % 36) as usize] as char;
        value /= 36;
    }
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_tokens_carry_prefix_and_base36_segments() {
        let token = generate_client_token("tool").expect("generate token");
        let parts: Vec<&str> = token.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "tool");
        assert!(!parts[1].is_empty());
        assert_eq!(parts[2].len(), 4);
        for segment in &parts[1..] {
            assert!(segment
                .chars()
                .all(|ch| ch.is_ascii_digit() || ch.is_ascii_lowercase()));
        }
    }

    #[test]
    fn base36_encoding_handles_zero_and_fixed_width() {
        assert_eq!(base36_encode_u64(0), "0");
        assert_eq!(base36_encode_u64(35), "z");
        assert_eq!(base36_encode_u64(36), "10");
        assert_eq!(base36_encode_fixed_u32(0, 4), "0000");
        assert_eq!(base36_encode_fixed_u32(35, 4), "000z");
    }
}
