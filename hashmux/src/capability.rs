//! Typed persistence capabilities.
//!
//! Whether instances can be exported to or resumed from a
//! [`SerializedBlob`](crate::SerializedBlob) is part of the registry's type.
//! `serialize` only exists on instances whose marker implements
//! [`CanSerialize`], `resume` only on constructors whose marker implements
//! [`CanDeserialize`]. Markers that need a disabled cargo feature do not
//! exist at all.

mod sealed {
    pub trait Sealed {}
}

/// Persistence capability of a registry and of every instance it creates.
pub trait Persistence: sealed::Sealed + 'static {
    const SERIALIZE: bool;
    const DESERIALIZE: bool;
}

/// Markers whose instances can be exported.
pub trait CanSerialize: Persistence {}

/// Markers whose constructors can resume exported instances.
pub trait CanDeserialize: Persistence {}

/// Neither export nor resume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ephemeral;

impl sealed::Sealed for Ephemeral {}
impl Persistence for Ephemeral {
    const SERIALIZE: bool = false;
    const DESERIALIZE: bool = false;
}

/// Export only.
#[cfg(feature = "serialize")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exportable;

#[cfg(feature = "serialize")]
impl sealed::Sealed for Exportable {}
#[cfg(feature = "serialize")]
impl Persistence for Exportable {
    const SERIALIZE: bool = true;
    const DESERIALIZE: bool = false;
}
#[cfg(feature = "serialize")]
impl CanSerialize for Exportable {}

/// Resume only.
#[cfg(feature = "deserialize")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resumable;

#[cfg(feature = "deserialize")]
impl sealed::Sealed for Resumable {}
#[cfg(feature = "deserialize")]
impl Persistence for Resumable {
    const SERIALIZE: bool = false;
    const DESERIALIZE: bool = true;
}
#[cfg(feature = "deserialize")]
impl CanDeserialize for Resumable {}

/// Export and resume.
#[cfg(all(feature = "serialize", feature = "deserialize"))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Persistent;

#[cfg(all(feature = "serialize", feature = "deserialize"))]
impl sealed::Sealed for Persistent {}
#[cfg(all(feature = "serialize", feature = "deserialize"))]
impl Persistence for Persistent {
    const SERIALIZE: bool = true;
    const DESERIALIZE: bool = true;
}
#[cfg(all(feature = "serialize", feature = "deserialize"))]
impl CanSerialize for Persistent {}
#[cfg(all(feature = "serialize", feature = "deserialize"))]
impl CanDeserialize for Persistent {}
