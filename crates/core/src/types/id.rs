//! Catalog identifiers.
//!
//! Product IDs are small integers shared by the catalog, the persisted cart
//! snapshot and the command line. [`define_id!`] wraps them in a newtype so a
//! quantity or an index can't be passed where an ID is expected.

/// Define an `i32` identifier newtype.
///
/// The generated type serializes as a bare JSON number, orders numerically,
/// and parses from text with surrounding whitespace ignored.
///
/// ```rust
/// use nepali_shop_core::ProductId;
///
/// let id: ProductId = " 7 ".parse().unwrap_or_default();
/// assert_eq!(id, ProductId::new(7));
/// assert_eq!(serde_json::to_string(&id).unwrap_or_default(), "7");
/// assert_eq!(format!("[{id:>3}]"), "[  7]");
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Default,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
