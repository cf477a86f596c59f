/// Declare a hex-displayed owned byte vector with constant-time equality.
macro_rules! owned_bytes {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Default, Eq)]
        pub struct $name(Vec<u8>);

        impl $name {
            /// Take the bytes out.
            pub fn into_vec(mut self) -> Vec<u8> {
                std::mem::take(&mut self.0)
            }
        }

        impl From<Vec<u8>> for $name {
            #[inline]
            fn from(bytes: Vec<u8>) -> Self {
                Self(bytes)
            }
        }

        impl From<&[u8]> for $name {
            #[inline]
            fn from(bytes: &[u8]) -> Self {
                Self(bytes.to_vec())
            }
        }

        impl AsRef<[u8]> for $name {
            #[inline]
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = [u8];

            #[inline]
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::memsec::ct_eq(&self.0, &other.0)
            }
        }

        impl PartialEq<[u8]> for $name {
            fn eq(&self, other: &[u8]) -> bool {
                $crate::memsec::ct_eq(&self.0, other)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(&format!(
                    "{name}<{size}>",
                    name = stringify!($name),
                    size = self.0.len()
                ))
                .field(&hex::encode(&self.0))
                .finish()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&hex::encode(&self.0))
            }
        }

        impl std::str::FromStr for $name {
            type Err = hex::FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                hex::decode(s).map(Self)
            }
        }
    };
}
