use log::warn;
use rand::rngs::{OsRng, SmallRng};
use rand::{RngCore, SeedableRng};
use std::time::{SystemTime, UNIX_EPOCH};

pub const STATIC_ADDRESS_PREFIX: &str = "static_";

/// Random 32 character uppercase hex identifier.
pub fn gen_uuid32() -> String {
    hex::encode_upper(random_bytes(&mut OsRng))
}

/// Fills 16 bytes from `source`, or from a time-seeded `SmallRng` when `source` fails.
pub(crate) fn random_bytes<R: RngCore>(source: &mut R) -> [u8; 16] {
    let mut bytes = [0u8; 16];
    if let Err(e) = source.try_fill_bytes(&mut bytes) {
        warn!("Secure random source unavailable ({}), falling back to SmallRng", e);
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default();
        SmallRng::seed_from_u64(seed).fill_bytes(&mut bytes);
    }
    bytes
}

/// Address handed out for a static wallet: the prefix plus the first 12 characters of its uuid.
pub fn static_address(uuid: &str) -> String {
    let head: String = uuid.chars().take(12).collect();
    format!("{}{}", STATIC_ADDRESS_PREFIX, head)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0)
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("no entropy"))
        }
    }

    #[test]
    fn uuid_is_32_uppercase_hex() {
        let uuid = gen_uuid32();
        assert_eq!(uuid.len(), 32);
        assert!(uuid
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn uuids_differ() {
        assert_ne!(gen_uuid32(), gen_uuid32());
    }

    #[test]
    fn falls_back_when_source_fails() {
        let bytes = random_bytes(&mut BrokenRng);
        assert_ne!(bytes, [0u8; 16]);
    }

    #[test]
    fn address_uses_first_twelve_chars() {
        assert_eq!(
            static_address("0A1B2C3D4E5F60718293A4B5C6D7E8F9"),
            "static_0A1B2C3D4E5F"
        );
        assert_eq!(static_address("ABC"), "static_ABC");
    }
}
