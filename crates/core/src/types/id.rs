//! Newtype IDs for type-safe entity references.
//!
//! Catalog entries are keyed by short opaque strings (`"1"`, `"2"`, ...), so
//! the IDs here wrap `String` rather than an integer.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>`, `Display` and `AsRef<str>`
///
/// # Example
///
/// ```rust
/// # use fabu_core::define_id;
/// define_id!(SkuId);
/// define_id!(LookbookId);
///
/// let sku = SkuId::new("blouse-xs");
/// assert_eq!(sku.as_str(), "blouse-xs");
///
/// // These are different types, so this won't compile:
/// // let _: LookbookId = sku;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display() {
        let id = ProductId::new("4");
        assert_eq!(id.to_string(), "4");
        assert_eq!(id.as_str(), "4");
    }

    #[test]
    fn test_product_id_serde_is_transparent() {
        let id = ProductId::from("6");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"6\"");

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_product_id_equality_is_by_value() {
        assert_eq!(ProductId::new("1"), ProductId::from(String::from("1")));
        assert_ne!(ProductId::new("1"), ProductId::new("01"));
    }
}
