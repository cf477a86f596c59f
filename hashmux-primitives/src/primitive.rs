//! Slice-based primitives, monomorphised per [`Variant`].
//!
//! Every primitive reports the size it needs even when the region it was
//! handed is too small, in which case it writes nothing. Callers compare the
//! returned size against what they provided.

use crate::family::Family;
use crate::state::HashState;
use crate::variant::Variant;

type State<V> = HashState<<V as Variant>::Family>;

pub(crate) fn init<V: Variant>(state: Option<&mut [u8]>) -> usize {
    let size = State::<V>::SIZE;
    if let Some(region) = state {
        if region.len() >= size {
            State::<V>::new(V::IV).store(region);
        }
    }

    size
}

pub(crate) fn update<V: Variant>(state: &mut [u8], data: &[u8]) {
    if state.len() < State::<V>::SIZE {
        return;
    }

    let mut hash = State::<V>::load(state);
    hash.update(data);
    hash.store(state);
}

pub(crate) fn finalize<V: Variant>(state: &mut [u8], out: &mut [u8]) -> usize {
    if state.len() >= State::<V>::SIZE && out.len() >= V::DIGEST_BYTES {
        let mut hash = State::<V>::load(state);
        hash.finalize(&mut out[..V::DIGEST_BYTES]);
        hash.store(state);
    }

    V::DIGEST_BYTES
}

pub(crate) fn reset<V: Variant>(state: &mut [u8]) {
    if state.len() >= State::<V>::SIZE {
        State::<V>::new(V::IV).store(state);
    }
}

#[cfg(feature = "serialize")]
pub(crate) fn serialize<V: Variant>(state: &[u8], out: &mut [u8]) -> usize {
    let size = State::<V>::CHECKPOINT_SIZE;
    if state.len() >= State::<V>::SIZE && out.len() >= size {
        State::<V>::load(state).export(&mut out[..size]);
    }

    size
}

#[cfg(feature = "deserialize")]
pub(crate) fn deserialize<V: Variant>(blob: &[u8], state: &mut [u8]) -> usize {
    let size = State::<V>::SIZE;
    if state.len() < size {
        return 0;
    }

    match State::<V>::import(blob) {
        Some(hash) => {
            hash.store(state);
            size
        }
        None => 0,
    }
}

/// Block size of a variant's family, for descriptor metadata.
pub(crate) const fn block_size<V: Variant>() -> usize {
    <V::Family as Family>::BLOCK_BYTES
}
