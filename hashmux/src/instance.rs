//! Streaming hash instances.
//!
//! An instance owns a private copy of its hash state and borrows the
//! registry that created it. Every operation checks the state out into the
//! shared arena, runs one primitive there and copies the result back, so
//! any number of instances, of any mix of algorithms, can be interleaved
//! over a single arena.

use std::fmt;

use hashmux_primitives::{AlgorithmDescriptor, AlgorithmId};
use tracing::trace;

use crate::capability::{Ephemeral, Persistence};
use crate::checkout::checkout;
use crate::error::{Error, Result};
use crate::memsec::Scrubbed;
use crate::output::Digest;
use crate::registry::FactoryRegistry;

/// One in-progress hash.
///
/// A fresh instance accepts [`digest`](Self::digest); once data has been
/// absorbed it is *streaming* until the next [`reset`](Self::reset).
///
/// Every method taking a `scrub` flag zeroes the arena regions it used
/// before returning, including on error.
pub struct HashInstance<'r, M: Persistence = Ephemeral> {
    pub(crate) registry: &'r FactoryRegistry<M>,
    pub(crate) descriptor: &'static AlgorithmDescriptor,
    pub(crate) state: Vec<u8>,
    streaming: bool,
}

impl<'r, M: Persistence> HashInstance<'r, M> {
    pub(crate) fn new(
        registry: &'r FactoryRegistry<M>,
        descriptor: &'static AlgorithmDescriptor,
        state: Vec<u8>,
        streaming: bool,
    ) -> Self {
        Self {
            registry,
            descriptor,
            state,
            streaming,
        }
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.descriptor.id
    }

    /// `true` once data has been absorbed since construction or the last
    /// reset. Resumed instances start streaming.
    pub fn is_streaming(&self) -> bool {
        self.streaming
    }

    pub fn state_size(&self) -> usize {
        self.state.len()
    }

    pub fn digest_size(&self) -> usize {
        self.descriptor.digest_size
    }

    /// Absorb `data`.
    ///
    /// Input larger than the arena's free capacity is absorbed in slices,
    /// one checkout each. Empty input only marks the instance as streaming.
    pub fn update(&mut self, data: &[u8], scrub: bool) -> Result<&mut Self> {
        if data.is_empty() {
            self.streaming = true;
            return Ok(self);
        }

        let registry = self.registry;
        let algorithm = self.descriptor.id;
        let update = self.descriptor.update;

        let mut arena = registry.arena()?;
        let capacity = arena.free_capacity(self.state.len());
        if capacity == 0 {
            return Err(Error::Capacity {
                requested: data.len(),
                available: 0,
            });
        }

        for (index, chunk) in data.chunks(capacity).enumerate() {
            trace!(%algorithm, index, len = chunk.len(), "staging input slice");

            checkout(&mut arena, algorithm, &mut self.state, scrub, |ws| {
                let (state, staged) = ws.staging(chunk.len())?;
                staged.copy_from_slice(chunk);
                update(state, staged);
                Ok(())
            })?;
            self.streaming = true;
        }

        Ok(self)
    }

    /// Finish the hash and return the digest.
    ///
    /// The state is consumed but not reset: call [`reset`](Self::reset)
    /// before absorbing more data.
    pub fn finalize(&mut self, scrub: bool) -> Result<Digest> {
        let registry = self.registry;
        let algorithm = self.descriptor.id;
        let finalize = self.descriptor.finalize;
        let digest_size = self.descriptor.digest_size;

        let mut arena = registry.arena()?;
        self.streaming = true;
        let digest = checkout(&mut arena, algorithm, &mut self.state, scrub, |ws| {
            let (state, result) = ws.staging(digest_size)?;
            let written = finalize(state, result);
            if written > result.len() {
                return Err(Error::Capacity {
                    requested: written,
                    available: result.len(),
                });
            }

            Ok(Digest::from(&result[..written]))
        })?;

        if tracing::event_enabled!(tracing::Level::TRACE) {
            trace!(%algorithm, digest = %digest, "finalized");
        }

        Ok(digest)
    }

    /// Return to the algorithm's initial state.
    pub fn reset(&mut self) -> Result<&mut Self> {
        let registry = self.registry;
        let reset = self.descriptor.reset;

        let mut arena = registry.arena()?;
        checkout(&mut arena, self.descriptor.id, &mut self.state, false, |ws| {
            reset(ws.state());
            Ok(())
        })?;

        self.streaming = false;
        Ok(self)
    }

    /// One-shot hash of `data`, leaving the instance fresh afterwards.
    ///
    /// Fails with [`Error::InvalidState`] when the instance is streaming.
    pub fn digest(&mut self, data: &[u8], scrub: bool) -> Result<Digest> {
        if self.streaming {
            return Err(Error::InvalidState);
        }

        self.update(data, scrub)?;
        let digest = self.finalize(scrub)?;
        self.reset()?;

        Ok(digest)
    }
}

impl<M: Persistence> fmt::Debug for HashInstance<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashInstance")
            .field("algorithm", &self.descriptor.id)
            .field("state_size", &self.state.len())
            .field("streaming", &self.streaming)
            .finish()
    }
}

impl<M: Persistence> Drop for HashInstance<'_, M> {
    fn drop(&mut self) {
        self.state.scrub();
    }
}

#[cfg(all(test, feature = "sha256", feature = "sha512"))]
mod tests {
    use super::*;
    use crate::RegistryConfig;

    const EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
    const D3: &str = "28969cdfa74a12c82f3bad960b0b000aca2ac329deea5c2328ebc6f2ba9802c1";

    fn registry(arena_len: usize) -> FactoryRegistry {
        FactoryRegistry::new(RegistryConfig::default().with_arena_len(arena_len)).unwrap()
    }

    #[test]
    fn vectors_three_ways() {
        let registry = registry(1024);
        let ctor = registry.sha256().unwrap();

        let mut h = ctor.create().unwrap();
        assert_eq!(h.digest(&[], false).unwrap().to_string(), EMPTY);
        assert_eq!(h.digest(&[0xd3], false).unwrap().to_string(), D3);

        let mut h = ctor.create().unwrap();
        let digest = h.update(&[0xd3], false).unwrap().finalize(false).unwrap();
        assert_eq!(digest.to_string(), D3);

        let mut h = ctor.create().unwrap();
        assert_eq!(h.finalize(false).unwrap().to_string(), EMPTY);
    }

    #[test]
    fn streaming_transitions() {
        let registry = registry(1024);
        let mut h = registry.sha256().unwrap().create().unwrap();
        assert!(!h.is_streaming());

        h.update(&[], false).unwrap();
        assert!(h.is_streaming());
        assert_eq!(h.digest(b"abc", false), Err(Error::InvalidState));

        h.reset().unwrap();
        assert!(!h.is_streaming());
        h.finalize(false).unwrap();
        assert!(h.is_streaming());
    }

    #[test]
    fn input_larger_than_arena_is_sliced() {
        // 64 bytes of staging next to the 209 byte SHA-512 state
        let small = registry(288);
        let large = registry(8192);
        let data: Vec<u8> = (0..1000u32).map(|i| (i * 7) as u8).collect();

        let mut a = small.sha512().unwrap().create().unwrap();
        let mut b = large.sha512().unwrap().create().unwrap();

        assert_eq!(
            a.digest(&data, true).unwrap(),
            b.digest(&data, false).unwrap()
        );
    }

    #[test]
    fn scrub_clears_the_arena() {
        let registry = registry(512);
        let mut h = registry.sha256().unwrap().create().unwrap();

        h.update(&[0x5a; 700], true).unwrap();
        assert!(registry.arena().unwrap().bytes().iter().all(|b| *b == 0));

        h.finalize(true).unwrap();
        assert!(registry.arena().unwrap().bytes().iter().all(|b| *b == 0));
    }

    #[test]
    fn residue_without_scrub() {
        let registry = registry(512);
        let mut h = registry.sha256().unwrap().create().unwrap();

        h.update(&[0x5a; 10], false).unwrap();
        let arena = registry.arena().unwrap();
        assert_eq!(&arena.bytes()[128..138], &[0x5a; 10]);
    }

    #[test]
    fn busy_arena_is_reported() {
        let registry = registry(512);
        let mut h = registry.sha256().unwrap().create().unwrap();

        let held = registry.arena().unwrap();
        assert_eq!(h.update(b"x", false).unwrap_err(), Error::ArenaBusy);
        assert_eq!(h.reset().unwrap_err(), Error::ArenaBusy);
        drop(held);

        assert!(h.reset().is_ok());
    }

    #[test]
    fn failed_calls_leave_instance_fresh() {
        let registry = registry(512);
        let mut h = registry.sha256().unwrap().create().unwrap();

        let held = registry.arena().unwrap();
        assert_eq!(h.update(b"x", false).unwrap_err(), Error::ArenaBusy);
        assert_eq!(h.finalize(false).unwrap_err(), Error::ArenaBusy);
        drop(held);

        assert!(!h.is_streaming());
        assert_eq!(h.digest(&[0xd3], false).unwrap().to_string(), D3);
    }

    #[test]
    fn debug_hides_state() {
        let registry = registry(512);
        let h = registry.sha256().unwrap().create().unwrap();
        assert_eq!(
            format!("{h:?}"),
            "HashInstance { algorithm: Sha256, state_size: 113, streaming: false }"
        );
        assert_eq!(h.digest_size(), 32);
        assert_eq!(h.algorithm(), AlgorithmId::Sha256);
    }
}
