//! Scoped, exclusive access to the arena.
//!
//! A checkout copies an instance's private snapshot into the state region,
//! hands the operation a [`Workspace`] that only exposes named regions, and
//! when the workspace goes away copies the region back into the snapshot
//! and, if asked, zeroes everything it touched. Both happen on every exit
//! path: success, error and unwinding.
//!
//! Checkouts never nest. The registry hands out the arena through a
//! `RefCell`, so a second checkout while one is open surfaces as
//! [`Error::ArenaBusy`] instead of corrupting the first.

use std::ops::Range;

use hashmux_primitives::AlgorithmId;
use tracing::trace;

use crate::arena::Arena;
use crate::error::{Error, Result};
use crate::memsec::Scrubbed;

pub(crate) struct Workspace<'a> {
    bytes: &'a mut [u8],
    state: Range<usize>,
    staging_base: usize,
    snapshot: Option<&'a mut [u8]>,
    scrub: bool,
    staged: Option<Range<usize>>,
}

impl<'a> Workspace<'a> {
    fn open(arena: &'a mut Arena, state_size: usize, scrub: bool) -> Result<Self> {
        let base = arena.state_base();
        let available = arena.len() - base;
        let staging_base = arena.staging_offset(state_size).ok_or(Error::Capacity {
            requested: state_size,
            available,
        })?;

        Ok(Self {
            bytes: arena.bytes_mut(),
            state: base..base + state_size,
            staging_base,
            snapshot: None,
            scrub,
            staged: None,
        })
    }

    /// The state region.
    pub fn state(&mut self) -> &mut [u8] {
        &mut self.bytes[self.state.clone()]
    }

    /// The state region together with `len` staging bytes right after it.
    pub fn staging(&mut self, len: usize) -> Result<(&mut [u8], &mut [u8])> {
        self.region(self.staging_base, len)
    }

    /// The state region together with the last `len` bytes of the arena.
    pub fn tail(&mut self, len: usize) -> Result<(&mut [u8], &mut [u8])> {
        let offset = self.bytes.len().checked_sub(len).ok_or(Error::Capacity {
            requested: len,
            available: self.bytes.len() - self.state.end,
        })?;

        self.region(offset, len)
    }

    fn region(&mut self, offset: usize, len: usize) -> Result<(&mut [u8], &mut [u8])> {
        let end = offset.checked_add(len).filter(|end| *end <= self.bytes.len());

        let end = match end {
            Some(end) if offset >= self.state.end => end,
            _ => {
                return Err(Error::Capacity {
                    requested: len,
                    available: self.bytes.len().saturating_sub(self.state.end.max(offset)),
                })
            }
        };

        // registered before the caller writes anything into it
        self.staged = match self.staged.take() {
            Some(prev) => Some(prev.start.min(offset)..prev.end.max(end)),
            None => Some(offset..end),
        };

        let (head, rest) = self.bytes.split_at_mut(offset);
        Ok((&mut head[self.state.clone()], &mut rest[..len]))
    }
}

impl Drop for Workspace<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.as_deref_mut() {
            snapshot.copy_from_slice(&self.bytes[self.state.clone()]);
        }

        if self.scrub {
            self.bytes[self.state.clone()].scrub();
            if let Some(staged) = self.staged.take() {
                self.bytes[staged].scrub();
            }
        }
    }
}

/// Run `op` with `snapshot` checked out into the state region.
pub(crate) fn checkout<R>(
    arena: &mut Arena,
    algorithm: AlgorithmId,
    snapshot: &mut [u8],
    scrub: bool,
    op: impl FnOnce(&mut Workspace<'_>) -> Result<R>,
) -> Result<R> {
    trace!(%algorithm, state_size = snapshot.len(), scrub, "arena checkout");

    let mut workspace = Workspace::open(arena, snapshot.len(), scrub)?;
    workspace.state().copy_from_slice(snapshot);
    workspace.snapshot = Some(snapshot);

    op(&mut workspace)
}

/// Run `op` on a state region of `state_size` bytes that no instance owns
/// yet. Nothing is copied in or back; the operation reads out what it needs.
pub(crate) fn scratch<R>(
    arena: &mut Arena,
    algorithm: AlgorithmId,
    state_size: usize,
    scrub: bool,
    op: impl FnOnce(&mut Workspace<'_>) -> Result<R>,
) -> Result<R> {
    trace!(%algorithm, state_size, scrub, "arena scratch checkout");

    let mut workspace = Workspace::open(arena, state_size, scrub)?;
    op(&mut workspace)
}
