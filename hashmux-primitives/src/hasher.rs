use crate::state::HashState;
use crate::variant::Variant;

macro_rules! typed_hasher {
    ($name:ident, $cfg:ty, $bytes:literal, $label:literal) => {
        #[doc = concat!("Owned ", $label, " hasher.")]
        ///
        /// Unlike the arena primitives this keeps its state on the stack; use
        /// it when a single, short-lived hash is all that is needed.
        pub struct $name(HashState<<$cfg as Variant>::Family>);

        impl $name {
            /// Digest length in bytes.
            pub const DIGEST_BYTES: usize = $bytes;

            /// create a new hasher at the algorithm's initial value
            #[inline]
            pub fn new() -> Self {
                Self(HashState::new(<$cfg as Variant>::IV))
            }

            /// absorb more input
            #[inline]
            pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
                self.0.update(bytes);
                self
            }

            /// return to the initial value, dropping everything absorbed
            #[inline]
            pub fn reset(&mut self) -> &mut Self {
                self.0 = HashState::new(<$cfg as Variant>::IV);
                self
            }

            /// consume the hasher and return the digest
            pub fn finalize(mut self) -> [u8; $bytes] {
                let mut digest = [0u8; $bytes];
                self.0.finalize(&mut digest);
                digest
            }

            /// convenient function to directly hash the given bytes without
            /// creating the intermediary hasher
            #[inline]
            pub fn digest(bytes: &[u8]) -> [u8; $bytes] {
                let mut hasher = Self::new();
                hasher.update(bytes);
                hasher.finalize()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

#[cfg(feature = "sha224")]
typed_hasher!(Sha224, crate::variant::Sha224Cfg, 28, "SHA-224");
#[cfg(feature = "sha256")]
typed_hasher!(Sha256, crate::variant::Sha256Cfg, 32, "SHA-256");
#[cfg(feature = "sha384")]
typed_hasher!(Sha384, crate::variant::Sha384Cfg, 48, "SHA-384");
#[cfg(feature = "sha512")]
typed_hasher!(Sha512, crate::variant::Sha512Cfg, 64, "SHA-512");
#[cfg(feature = "sha512_256")]
typed_hasher!(Sha512_256, crate::variant::Sha512_256Cfg, 32, "SHA-512/256");

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "sha256")]
    #[test]
    fn sha256_vectors() {
        assert_eq!(
            hex::encode(Sha256::digest(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hex::encode(Sha256::digest(&[0xd3])),
            "28969cdfa74a12c82f3bad960b0b000aca2ac329deea5c2328ebc6f2ba9802c1"
        );
        assert_eq!(
            hex::encode(Sha256::digest(
                b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"
            )),
            "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"
        );
    }

    #[cfg(feature = "sha224")]
    #[test]
    fn sha224_abc() {
        assert_eq!(
            hex::encode(Sha224::digest(b"abc")),
            "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"
        );
    }

    #[cfg(feature = "sha384")]
    #[test]
    fn sha384_abc() {
        assert_eq!(
            hex::encode(Sha384::digest(b"abc")),
            "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed\
             8086072ba1e7cc2358baeca134c825a7"
        );
    }

    #[cfg(feature = "sha512")]
    #[test]
    fn sha512_abc() {
        assert_eq!(
            hex::encode(Sha512::digest(b"abc")),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[cfg(feature = "sha512_256")]
    #[test]
    fn sha512_256_abc() {
        assert_eq!(
            hex::encode(Sha512_256::digest(b"abc")),
            "53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23"
        );
    }

    #[cfg(feature = "sha256")]
    #[test]
    fn reset_forgets_input() {
        let mut hasher = Sha256::new();
        hasher.update(b"garbage").reset().update(&[0xd3]);
        assert_eq!(hasher.finalize(), Sha256::digest(&[0xd3]));
    }
}
