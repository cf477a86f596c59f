//! Algorithm constructors sharing one arena.

use std::cell::{RefCell, RefMut};
use std::fmt;
use std::marker::PhantomData;

use hashmux_primitives::{descriptor, AlgorithmDescriptor, AlgorithmId};
use tracing::debug;

use crate::arena::Arena;
#[cfg(feature = "deserialize")]
use crate::capability::CanDeserialize;
use crate::capability::{Ephemeral, Persistence};
use crate::checkout::scratch;
use crate::config::RegistryConfig;
use crate::error::{Error, Result};
use crate::instance::HashInstance;

/// Upper bound on the state size a primitive may report.
pub const MAX_STATE_SIZE: usize = 4096;

#[derive(Clone, Copy)]
struct Entry {
    descriptor: &'static AlgorithmDescriptor,
    state_size: usize,
}

/// Owns the arena and exposes one [`Constructor`] per enabled algorithm.
///
/// The set of algorithms and the persistence capability `M` are fixed when
/// the registry is built. Every instance borrows the registry, so the arena
/// outlives all of them.
pub struct FactoryRegistry<M: Persistence = Ephemeral> {
    arena: RefCell<Arena>,
    entries: [Option<Entry>; AlgorithmId::ALL.len()],
    _capability: PhantomData<M>,
}

impl<M: Persistence> FactoryRegistry<M> {
    /// Allocate the arena and resolve every configured algorithm against
    /// the compiled-in primitives.
    ///
    /// Fails with [`Error::Construction`] when an algorithm is not compiled
    /// in, lacks a primitive `M` requires, reports an implausible state size,
    /// or does not fit the arena next to its largest staged result.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let compiled: Vec<_> = AlgorithmId::compiled().filter_map(descriptor).collect();
        Self::with_descriptors(config, &compiled)
    }

    /// Like [`FactoryRegistry::new`], resolving algorithms in `descriptors`
    /// instead of the compiled-in table.
    ///
    /// Every configured algorithm must have an entry in `descriptors`. The
    /// first entry for an id wins.
    pub fn with_descriptors(
        config: RegistryConfig,
        descriptors: &[&'static AlgorithmDescriptor],
    ) -> Result<Self> {
        let arena = Arena::new(config.arena_len, config.reserved_prefix)?;
        let mut entries = [None; AlgorithmId::ALL.len()];

        for id in config.algorithms.iter().copied() {
            let descriptor = descriptors
                .iter()
                .copied()
                .find(|d| d.id == id)
                .ok_or_else(|| Error::Construction(format!("{id} is not compiled in")))?;
            entries[id as usize] = Some(resolve::<M>(&arena, descriptor)?);
        }

        debug!(
            algorithms = ?config.algorithms,
            arena_len = arena.len(),
            state_base = arena.state_base(),
            serialize = M::SERIALIZE,
            deserialize = M::DESERIALIZE,
            "registry ready"
        );

        Ok(Self {
            arena: RefCell::new(arena),
            entries,
            _capability: PhantomData,
        })
    }

    /// Constructor for `id`, or `None` when the algorithm is not enabled.
    pub fn constructor(&self, id: AlgorithmId) -> Option<Constructor<'_, M>> {
        self.entries[id as usize].map(|entry| Constructor {
            registry: self,
            entry,
        })
    }

    /// Enabled algorithms, in canonical order.
    pub fn algorithms(&self) -> impl Iterator<Item = AlgorithmId> + '_ {
        AlgorithmId::ALL
            .into_iter()
            .filter(|id| self.entries[*id as usize].is_some())
    }

    #[cfg(feature = "sha224")]
    pub fn sha224(&self) -> Option<Constructor<'_, M>> {
        self.constructor(AlgorithmId::Sha224)
    }

    #[cfg(feature = "sha256")]
    pub fn sha256(&self) -> Option<Constructor<'_, M>> {
        self.constructor(AlgorithmId::Sha256)
    }

    #[cfg(feature = "sha384")]
    pub fn sha384(&self) -> Option<Constructor<'_, M>> {
        self.constructor(AlgorithmId::Sha384)
    }

    #[cfg(feature = "sha512")]
    pub fn sha512(&self) -> Option<Constructor<'_, M>> {
        self.constructor(AlgorithmId::Sha512)
    }

    #[cfg(feature = "sha512_256")]
    pub fn sha512_256(&self) -> Option<Constructor<'_, M>> {
        self.constructor(AlgorithmId::Sha512_256)
    }

    /// Exclusive access to the arena for the length of one checkout.
    pub(crate) fn arena(&self) -> Result<RefMut<'_, Arena>> {
        self.arena.try_borrow_mut().map_err(|_| Error::ArenaBusy)
    }
}

fn resolve<M: Persistence>(
    arena: &Arena,
    descriptor: &'static AlgorithmDescriptor,
) -> Result<Entry> {
    let id = descriptor.id;
    let state_size = (descriptor.init)(None);
    if state_size == 0 || state_size > MAX_STATE_SIZE {
        return Err(Error::Construction(format!(
            "{id} reports a state size of {state_size} bytes"
        )));
    }

    if M::SERIALIZE && descriptor.serialize.is_none() {
        return Err(Error::Construction(format!("{id} cannot serialize")));
    }
    if M::DESERIALIZE && descriptor.deserialize.is_none() {
        return Err(Error::Construction(format!("{id} cannot deserialize")));
    }

    let mut staged = descriptor.digest_size;
    if M::SERIALIZE || M::DESERIALIZE {
        staged = staged.max(descriptor.serialized_size);
    }

    let capacity = arena.free_capacity(state_size);
    if arena.staging_offset(state_size).is_none() || capacity < staged.max(1) {
        return Err(Error::Construction(format!(
            "{id} needs {state_size} bytes of state and {staged} bytes of staging, \
             a {} byte arena at offset {} leaves {capacity}",
            arena.len(),
            arena.state_base(),
        )));
    }

    Ok(Entry {
        descriptor,
        state_size,
    })
}

impl<M: Persistence> fmt::Debug for FactoryRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FactoryRegistry")
            .field("arena", &self.arena)
            .field("algorithms", &self.algorithms().collect::<Vec<_>>())
            .field("serialize", &M::SERIALIZE)
            .field("deserialize", &M::DESERIALIZE)
            .finish()
    }
}

/// Creates instances of one algorithm.
pub struct Constructor<'r, M: Persistence = Ephemeral> {
    registry: &'r FactoryRegistry<M>,
    entry: Entry,
}

impl<M: Persistence> Clone for Constructor<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: Persistence> Copy for Constructor<'_, M> {}

impl<'r, M: Persistence> Constructor<'r, M> {
    pub fn algorithm(&self) -> AlgorithmId {
        self.entry.descriptor.id
    }

    /// Size of the working state every instance carries.
    pub fn state_size(&self) -> usize {
        self.entry.state_size
    }

    /// A fresh instance at the algorithm's initial state.
    pub fn create(&self) -> Result<HashInstance<'r, M>> {
        let Entry {
            descriptor,
            state_size,
        } = self.entry;
        let init = descriptor.init;

        let mut arena = self.registry.arena()?;
        let state = scratch(&mut arena, descriptor.id, state_size, false, |ws| {
            let written = init(Some(ws.state()));
            if written != state_size {
                return Err(Error::Construction(format!(
                    "{} init wrote {written} bytes, size query reported {state_size}",
                    descriptor.id
                )));
            }

            Ok(ws.state().to_vec())
        })?;
        drop(arena);

        debug!(algorithm = %descriptor.id, state_size, "instance created");
        Ok(HashInstance::new(self.registry, descriptor, state, false))
    }
}

#[cfg(feature = "deserialize")]
impl<'r, M: CanDeserialize> Constructor<'r, M> {
    /// Rebuild an instance from a checkpoint produced by `serialize`.
    ///
    /// The resumed instance is streaming. Fails with
    /// [`Error::Deserialization`] for corrupt checkpoints or checkpoints of
    /// another algorithm family, and with [`Error::Capacity`] when the
    /// checkpoint cannot be staged without overlapping the state region.
    pub fn resume(&self, blob: &[u8], scrub: bool) -> Result<HashInstance<'r, M>> {
        let descriptor = self.entry.descriptor;
        let required = (descriptor.init)(None);

        let mut arena = self.registry.arena()?;
        let state = crate::serialization::restore(&mut arena, descriptor, required, blob, scrub)?;
        drop(arena);

        debug!(algorithm = %descriptor.id, state_size = state.len(), "instance resumed");
        Ok(HashInstance::new(self.registry, descriptor, state, true))
    }
}

impl<M: Persistence> fmt::Debug for Constructor<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("algorithm", &self.algorithm())
            .field("state_size", &self.entry.state_size)
            .finish()
    }
}
