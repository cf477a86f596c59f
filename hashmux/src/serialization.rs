//! Export and resume of in-progress hashes.
//!
//! Outgoing checkpoints are written right after the state region, like any
//! other staged result. Incoming ones are staged at the very end of the
//! arena, so they cannot overlap the state region before the size of the
//! restored state is known.

#[cfg(feature = "deserialize")]
use hashmux_primitives::AlgorithmDescriptor;
#[cfg(feature = "serialize")]
use tracing::trace;
#[cfg(feature = "deserialize")]
use tracing::warn;

#[cfg(feature = "deserialize")]
use crate::arena::Arena;
#[cfg(feature = "serialize")]
use crate::capability::CanSerialize;
#[cfg(feature = "serialize")]
use crate::checkout::checkout;
#[cfg(feature = "deserialize")]
use crate::checkout::scratch;
use crate::error::{Error, Result};
#[cfg(feature = "serialize")]
use crate::instance::HashInstance;
#[cfg(feature = "serialize")]
use crate::output::SerializedBlob;

#[cfg(feature = "serialize")]
impl<M: CanSerialize> HashInstance<'_, M> {
    /// Export the current state as a portable checkpoint.
    ///
    /// The instance itself is left untouched and can keep absorbing data.
    pub fn serialize(&mut self, scrub: bool) -> Result<SerializedBlob> {
        let registry = self.registry;
        let algorithm = self.descriptor.id;
        let size = self.descriptor.serialized_size;
        let serialize = self.descriptor.serialize.ok_or_else(|| {
            Error::Construction(format!("{algorithm} has no serialize primitive"))
        })?;

        let mut arena = registry.arena()?;
        let blob = checkout(&mut arena, algorithm, &mut self.state, scrub, |ws| {
            let (state, out) = ws.staging(size)?;
            let written = serialize(state, out);
            if written > out.len() {
                return Err(Error::Capacity {
                    requested: written,
                    available: out.len(),
                });
            }

            Ok(SerializedBlob::from(&out[..written]))
        })?;

        if tracing::event_enabled!(tracing::Level::TRACE) {
            trace!(%algorithm, blob = %blob, "serialized");
        }

        Ok(blob)
    }
}

/// Rebuild a working state from `blob`.
///
/// `required` is the state size the algorithm's `init` reports. The returned
/// state is as long as the deserialize primitive says.
#[cfg(feature = "deserialize")]
pub(crate) fn restore(
    arena: &mut Arena,
    descriptor: &AlgorithmDescriptor,
    required: usize,
    blob: &[u8],
    scrub: bool,
) -> Result<Vec<u8>> {
    let algorithm = descriptor.id;
    let deserialize = descriptor.deserialize.ok_or_else(|| {
        Error::Construction(format!("{algorithm} has no deserialize primitive"))
    })?;

    scratch(arena, algorithm, required, scrub, |ws| {
        let (state, staged) = ws.tail(blob.len())?;
        staged.copy_from_slice(blob);

        let restored = deserialize(staged, state);
        if restored == 0 || restored > state.len() {
            warn!(%algorithm, len = blob.len(), restored, "checkpoint rejected");
            return Err(Error::Deserialization(algorithm));
        }

        Ok(state[..restored].to_vec())
    })
}
