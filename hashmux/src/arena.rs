//! The fixed-size scratch buffer shared by every instance of a registry.
//!
//! Layout, for a state of `S` bytes and an arena of `N` bytes:
//!
//! ```text
//! [0 .. prefix)                         reserved, never touched
//! [state_base .. state_base + S)        state region
//! [align16(state_base + S) .. N)        staging: input slices, digests,
//!                                       outgoing checkpoints
//! [N - blob .. N)                       incoming checkpoints
//! ```
//!
//! The arena is only ever reached through a checkout; see
//! [`crate::checkout`].

use std::fmt;

use crate::align::{align_up16, staging_offset};
use crate::error::{Error, Result};
use crate::memsec::Scrubbed;

pub struct Arena {
    buffer: Box<[u8]>,
    state_base: usize,
}

impl Arena {
    /// Allocate a zeroed arena of `len` bytes whose state region starts at
    /// the first 16-byte boundary past `reserved_prefix`.
    pub fn new(len: usize, reserved_prefix: usize) -> Result<Self> {
        if len == 0 {
            return Err(Error::Construction("arena length must be non-zero".into()));
        }

        let state_base = align_up16(reserved_prefix)
            .filter(|base| *base < len)
            .ok_or_else(|| {
                Error::Construction(format!(
                    "reserved prefix of {reserved_prefix} bytes leaves no room in a {len} byte arena"
                ))
            })?;

        Ok(Self {
            buffer: vec![0u8; len].into_boxed_slice(),
            state_base,
        })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Offset of the state region.
    pub fn state_base(&self) -> usize {
        self.state_base
    }

    /// Offset right after a state of `state_size` bytes, where staged data
    /// goes. `None` if the state alone does not fit.
    pub fn staging_offset(&self, state_size: usize) -> Option<usize> {
        staging_offset(self.state_base, state_size).filter(|offset| *offset <= self.len())
    }

    /// Bytes available for staging input next to a state of `state_size`
    /// bytes.
    pub fn free_capacity(&self, state_size: usize) -> usize {
        self.staging_offset(state_size)
            .map(|offset| self.len() - offset)
            .unwrap_or(0)
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    #[cfg(test)]
    pub(crate) fn bytes(&self) -> &[u8] {
        &self.buffer
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("len", &self.len())
            .field("state_base", &self.state_base)
            .finish()
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        self.buffer.scrub();
    }
}
