pub const ADDRESS_PREFIX: char = 'r';
pub const ADDRESS_MIN_LEN: usize = 25;
pub const ADDRESS_MAX_LEN: usize = 34;

/// Syntactic check for a classic XRPL account address.
///
/// Accepts `r` followed by 24 to 33 characters of the ledger's Base58 alphabet
/// (no `0`, `O`, `I` or `l`). The checksum is not verified.
pub fn is_valid_address(address: &str) -> bool {
    let len = address.len();

    address.starts_with(ADDRESS_PREFIX)
        && (ADDRESS_MIN_LEN..=ADDRESS_MAX_LEN).contains(&len)
        && address.bytes().skip(1).all(is_base58_byte)
}

fn is_base58_byte(byte: u8) -> bool {
    matches!(
        byte,
        b'1'..=b'9' | b'A'..=b'H' | b'J'..=b'N' | b'P'..=b'Z' | b'a'..=b'k' | b'm'..=b'z'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_addresses() {
        assert!(is_valid_address("rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH"));
        assert!(is_valid_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
        // shortest accepted length
        assert!(is_valid_address("rN7n7otQDd6FczFgLdSqtcsAU"));
    }

    #[test]
    fn rejects_bad_prefix() {
        assert!(!is_valid_address("xN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH"));
        assert!(!is_valid_address("RN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRH"));
    }

    #[test]
    fn rejects_bad_length() {
        assert!(!is_valid_address("r123"));
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("rN7n7otQDd6FczFgLdSqtcsA"));
        assert!(!is_valid_address("rN7n7otQDd6FczFgLdSqtcsAUxDkw6fzRHa"));
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        for bad in ['0', 'O', 'I', 'l', ' ', '-', 'é'] {
            let address = format!("rN7n7otQDd6FczFgLdSqtcsAUxDkw6fz{bad}");
            assert!(!is_valid_address(&address), "{address} should be rejected");
        }
    }
}
