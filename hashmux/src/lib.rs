//! Streaming SHA-2 hash instances multiplexed over one shared arena
//!
//! A [`FactoryRegistry`] owns a single fixed-size scratch buffer, the arena,
//! and hands out one [`Constructor`] per enabled algorithm. Each
//! [`HashInstance`] keeps a private copy of its hash state and only touches
//! the arena for the length of one primitive call, so any number of
//! instances can be interleaved over the same memory. Inputs larger than the
//! arena are absorbed in slices.
//!
//! ```
//! use hashmux::{FactoryRegistry, RegistryConfig};
//!
//! let registry: FactoryRegistry = FactoryRegistry::new(RegistryConfig::default())?;
//! let sha256 = registry.sha256().expect("enabled by default");
//!
//! let mut a = sha256.create()?;
//! let mut b = sha256.create()?;
//! a.update(b"a", false)?;
//! b.update(b"unrelated", false)?;
//! a.update(b"bc", false)?;
//!
//! assert_eq!(
//!     a.finalize(false)?.to_string(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! # Ok::<(), hashmux::Error>(())
//! ```
//!
//! # Persistence
//!
//! Exporting and resuming in-progress hashes is a capability of the registry
//! type. With the [`Persistent`] marker instances gain `serialize` and
//! constructors gain `resume`:
//!
//! ```
//! # #[cfg(all(feature = "serialize", feature = "deserialize"))]
//! # {
//! use hashmux::{FactoryRegistry, Persistent, RegistryConfig};
//!
//! let registry = FactoryRegistry::<Persistent>::new(RegistryConfig::default())?;
//! let sha512 = registry.sha512().unwrap();
//!
//! let mut h = sha512.create()?;
//! h.update(b"first half, ", false)?;
//! let checkpoint = h.serialize(true)?;
//!
//! let mut resumed = sha512.resume(&checkpoint, true)?;
//! resumed.update(b"second half", false)?;
//! h.update(b"second half", false)?;
//! assert_eq!(resumed.finalize(false)?, h.finalize(false)?);
//! # }
//! # Ok::<(), hashmux::Error>(())
//! ```
//!
//! The default [`Ephemeral`] marker has no such methods at all:
//!
//! ```compile_fail
//! use hashmux::{FactoryRegistry, RegistryConfig};
//!
//! let registry: FactoryRegistry = FactoryRegistry::new(RegistryConfig::default()).unwrap();
//! let mut h = registry.sha256().unwrap().create().unwrap();
//! h.serialize(false);
//! ```
//!
//! # Scrubbing
//!
//! Methods taking a `scrub` flag zero every arena region they used before
//! returning, on success and on error alike. Instances scrub their private
//! state when dropped, and the arena is scrubbed with its registry.

mod align;
mod arena;
mod capability;
mod checkout;
mod config;
mod error;
mod instance;
pub mod memsec;
mod output;
mod registry;
#[cfg(any(feature = "serialize", feature = "deserialize"))]
mod serialization;

pub use hashmux_primitives::{AlgorithmDescriptor, AlgorithmId, ParseAlgorithmError};

pub use align::{align_up16, ALIGNMENT};
pub use arena::Arena;
pub use capability::{CanDeserialize, CanSerialize, Ephemeral, Persistence};
#[cfg(feature = "serialize")]
pub use capability::Exportable;
#[cfg(all(feature = "serialize", feature = "deserialize"))]
pub use capability::Persistent;
#[cfg(feature = "deserialize")]
pub use capability::Resumable;
pub use config::{RegistryConfig, DEFAULT_ARENA_LEN};
pub use error::{Error, Result};
pub use instance::HashInstance;
pub use output::{Digest, SerializedBlob};
pub use registry::{Constructor, FactoryRegistry, MAX_STATE_SIZE};
