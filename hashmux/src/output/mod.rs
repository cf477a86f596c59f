//! Owned byte values handed back to callers.
//!
//! Both types are plain byte vectors whose length depends on the algorithm,
//! displayed and parsed as lowercase hex. Equality is constant in time.

#[macro_use]
mod bytes;
#[cfg(feature = "json")]
mod serde;

use crate::memsec::Scrubbed;

owned_bytes! {
    /// Digest produced by `finalize` or `digest`.
    Digest
}

owned_bytes! {
    /// Portable checkpoint of an in-progress hash, produced by `serialize`
    /// and accepted by `resume`.
    ///
    /// The layout belongs to the hashing engine and is not guaranteed stable
    /// across builds. The bytes are scrubbed on drop.
    SerializedBlob
}

impl Drop for SerializedBlob {
    fn drop(&mut self) {
        self.0.scrub();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn hex_display_and_parse() {
        let digest: Digest = EMPTY_SHA256.parse().unwrap();
        assert_eq!(digest.len(), 32);
        assert_eq!(digest.to_string(), EMPTY_SHA256);
        assert_eq!(
            format!("{digest:?}"),
            format!("Digest<32>(\"{EMPTY_SHA256}\")")
        );
    }

    #[test]
    fn rejects_bad_hex() {
        assert!("abc".parse::<Digest>().is_err());
        assert!("zz".parse::<SerializedBlob>().is_err());
    }

    #[test]
    fn equality() {
        let a = Digest::from(vec![1, 2, 3]);
        assert_eq!(a, Digest::from(vec![1, 2, 3]));
        assert_ne!(a, Digest::from(vec![1, 2, 4]));
        assert_ne!(a, Digest::from(vec![1, 2]));
        assert_eq!(a, [1u8, 2, 3][..]);
        assert_eq!(Digest::default(), Digest::from(Vec::new()));
    }

    #[test]
    fn blob_into_vec_keeps_bytes() {
        let blob = SerializedBlob::from(vec![9u8; 12]);
        let copy = blob.clone();
        assert_eq!(blob.into_vec(), vec![9u8; 12]);
        assert_eq!(copy.as_ref(), &[9u8; 12]);
    }
}
