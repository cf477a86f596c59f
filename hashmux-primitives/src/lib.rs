//! SHA-2 primitives over caller-owned byte regions
//!
//! This crate is the compression engine behind `hashmux`. Every algorithm
//! is exposed two ways:
//!
//! * as six slice-based primitives (`init`, `update`, `finalize`, `reset`,
//!   `serialize`, `deserialize`) bundled in an [`AlgorithmDescriptor`]. The
//!   primitives never own memory: the hash state is an opaque blob living in
//!   whatever region the caller hands over, which is what lets a single
//!   scratch arena be multiplexed between many hash instances.
//! * as typed one-shot hashers ([`Sha256`], [`Sha512`], ...) for callers that
//!   just want a digest.
//!
//! # Example
//!
//! ```
//! use hashmux_primitives::{descriptor, AlgorithmId};
//!
//! let sha256 = descriptor(AlgorithmId::Sha256).unwrap();
//!
//! let mut state = vec![0u8; (sha256.init)(None)];
//! (sha256.init)(Some(&mut state));
//! (sha256.update)(&mut state, b"abc");
//!
//! let mut digest = [0u8; 32];
//! assert_eq!((sha256.finalize)(&mut state, &mut digest), 32);
//! # assert_eq!(
//! #   "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
//! #   hex::encode(digest)
//! # );
//! ```
//!
//! Which algorithms exist, and whether `serialize` / `deserialize` are wired
//! into the descriptors, is decided by cargo features of the same names.

mod descriptor;
mod family;
mod hasher;
mod primitive;
mod state;
mod variant;

pub use self::descriptor::{
    descriptor, AlgorithmDescriptor, AlgorithmId, DeserializeFn, FinalizeFn, InitFn,
    ParseAlgorithmError, ResetFn, SerializeFn, UpdateFn,
};

#[cfg(feature = "sha224")]
pub use self::hasher::Sha224;
#[cfg(feature = "sha256")]
pub use self::hasher::Sha256;
#[cfg(feature = "sha384")]
pub use self::hasher::Sha384;
#[cfg(feature = "sha512")]
pub use self::hasher::Sha512;
#[cfg(feature = "sha512_256")]
pub use self::hasher::Sha512_256;

/// Largest working state any algorithm of this crate asks for, in bytes.
pub const MAX_STATE_SIZE: usize = 209;

/// Largest digest any algorithm of this crate produces, in bytes.
pub const MAX_DIGEST_SIZE: usize = 64;
