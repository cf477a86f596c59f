use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Write a fresh state into the region and return the state size. `None`
/// only reports the size.
pub type InitFn = fn(Option<&mut [u8]>) -> usize;
/// Absorb `data` into the state.
pub type UpdateFn = fn(&mut [u8], &[u8]);
/// Finish the hash, write the digest into the output region and return the
/// digest size. The state is consumed but not reset.
pub type FinalizeFn = fn(&mut [u8], &mut [u8]) -> usize;
/// Put the state back to the algorithm's initial value.
pub type ResetFn = fn(&mut [u8]);
/// Write a portable checkpoint of the state and return its size.
pub type SerializeFn = fn(&[u8], &mut [u8]) -> usize;
/// Rebuild a state from a checkpoint and return the state size, or `0` when
/// the checkpoint is corrupt or belongs to another family.
pub type DeserializeFn = fn(&[u8], &mut [u8]) -> usize;

/// Identifier of a SHA-2 algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AlgorithmId {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_256,
}

impl AlgorithmId {
    /// Every algorithm, whether compiled in or not.
    pub const ALL: [AlgorithmId; 5] = [
        AlgorithmId::Sha224,
        AlgorithmId::Sha256,
        AlgorithmId::Sha384,
        AlgorithmId::Sha512,
        AlgorithmId::Sha512_256,
    ];

    /// canonical lowercase name, e.g. `sha512_256`
    pub const fn name(self) -> &'static str {
        match self {
            AlgorithmId::Sha224 => "sha224",
            AlgorithmId::Sha256 => "sha256",
            AlgorithmId::Sha384 => "sha384",
            AlgorithmId::Sha512 => "sha512",
            AlgorithmId::Sha512_256 => "sha512_256",
        }
    }

    /// `true` when the algorithm's cargo feature is enabled.
    pub fn is_compiled(self) -> bool {
        descriptor(self).is_some()
    }

    /// Iterator over the compiled-in algorithms.
    pub fn compiled() -> impl Iterator<Item = AlgorithmId> {
        Self::ALL.into_iter().filter(|id| id.is_compiled())
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("unknown algorithm: {0}")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for AlgorithmId {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| ParseAlgorithmError(s.to_owned()))
    }
}

/// The primitive table of one algorithm, plus the sizes needed to lay out a
/// shared arena before any state exists.
#[derive(Clone, Copy)]
pub struct AlgorithmDescriptor {
    pub id: AlgorithmId,
    pub digest_size: usize,
    pub block_size: usize,
    pub serialized_size: usize,
    pub init: InitFn,
    pub update: UpdateFn,
    pub finalize: FinalizeFn,
    pub reset: ResetFn,
    /// `None` when the `serialize` feature is off.
    pub serialize: Option<SerializeFn>,
    /// `None` when the `deserialize` feature is off.
    pub deserialize: Option<DeserializeFn>,
}

impl fmt::Debug for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmDescriptor")
            .field("id", &self.id)
            .field("digest_size", &self.digest_size)
            .field("block_size", &self.block_size)
            .field("serialized_size", &self.serialized_size)
            .field("serialize", &self.serialize.is_some())
            .field("deserialize", &self.deserialize.is_some())
            .finish()
    }
}

#[allow(unused_macros)]
macro_rules! descriptor_for {
    ($cfg:ty) => {
        AlgorithmDescriptor {
            id: <$cfg as crate::variant::Variant>::ID,
            digest_size: <$cfg as crate::variant::Variant>::DIGEST_BYTES,
            block_size: crate::primitive::block_size::<$cfg>(),
            serialized_size: crate::state::HashState::<
                <$cfg as crate::variant::Variant>::Family,
            >::CHECKPOINT_SIZE,
            init: crate::primitive::init::<$cfg>,
            update: crate::primitive::update::<$cfg>,
            finalize: crate::primitive::finalize::<$cfg>,
            reset: crate::primitive::reset::<$cfg>,
            #[cfg(feature = "serialize")]
            serialize: Some(crate::primitive::serialize::<$cfg>),
            #[cfg(not(feature = "serialize"))]
            serialize: None,
            #[cfg(feature = "deserialize")]
            deserialize: Some(crate::primitive::deserialize::<$cfg>),
            #[cfg(not(feature = "deserialize"))]
            deserialize: None,
        }
    };
}

#[cfg(feature = "sha224")]
static SHA224: AlgorithmDescriptor = descriptor_for!(crate::variant::Sha224Cfg);
#[cfg(feature = "sha256")]
static SHA256: AlgorithmDescriptor = descriptor_for!(crate::variant::Sha256Cfg);
#[cfg(feature = "sha384")]
static SHA384: AlgorithmDescriptor = descriptor_for!(crate::variant::Sha384Cfg);
#[cfg(feature = "sha512")]
static SHA512: AlgorithmDescriptor = descriptor_for!(crate::variant::Sha512Cfg);
#[cfg(feature = "sha512_256")]
static SHA512_256: AlgorithmDescriptor = descriptor_for!(crate::variant::Sha512_256Cfg);

/// Look up the primitive table of an algorithm. Returns `None` when the
/// algorithm was compiled out.
#[allow(unreachable_patterns)]
pub fn descriptor(id: AlgorithmId) -> Option<&'static AlgorithmDescriptor> {
    match id {
        #[cfg(feature = "sha224")]
        AlgorithmId::Sha224 => Some(&SHA224),
        #[cfg(feature = "sha256")]
        AlgorithmId::Sha256 => Some(&SHA256),
        #[cfg(feature = "sha384")]
        AlgorithmId::Sha384 => Some(&SHA384),
        #[cfg(feature = "sha512")]
        AlgorithmId::Sha512 => Some(&SHA512),
        #[cfg(feature = "sha512_256")]
        AlgorithmId::Sha512_256 => Some(&SHA512_256),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.to_string().parse::<AlgorithmId>().unwrap(), id);
        }
        assert_eq!(
            "sha512/256".parse::<AlgorithmId>(),
            Err(ParseAlgorithmError("sha512/256".into()))
        );
    }

    #[cfg(all(feature = "sha384", feature = "sha512_256"))]
    #[test]
    fn descriptor_metadata() {
        let sha384 = descriptor(AlgorithmId::Sha384).unwrap();
        assert_eq!(sha384.id, AlgorithmId::Sha384);
        assert_eq!(sha384.digest_size, 48);
        assert_eq!(sha384.block_size, 128);
        assert_eq!(sha384.serialized_size, 209);
        assert_eq!((sha384.init)(None), 209);

        let truncated = descriptor(AlgorithmId::Sha512_256).unwrap();
        assert_eq!(truncated.digest_size, 32);
    }

    #[cfg(feature = "sha224")]
    #[test]
    fn small_family_sizes() {
        let sha224 = descriptor(AlgorithmId::Sha224).unwrap();
        assert_eq!(sha224.block_size, 64);
        assert_eq!(sha224.serialized_size, 105);
        assert_eq!((sha224.init)(None), 113);
    }
}
