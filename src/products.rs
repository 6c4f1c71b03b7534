//! Products

use std::fmt;

/// Stable identifier of a product (not of a product variant).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductSlug(String);

impl ProductSlug {
    /// Create a slug from any string-like value.
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    /// Borrow the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductSlug {
    fn from(slug: &str) -> Self {
        Self::new(slug)
    }
}

impl From<String> for ProductSlug {
    fn from(slug: String) -> Self {
        Self(slug)
    }
}

impl fmt::Display for ProductSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;

    #[test]
    fn slugs_compare_by_value() {
        let a = ProductSlug::from("pho-bo");
        let b = ProductSlug::new(String::from("pho-bo"));

        assert_eq!(a, b);
        assert_eq!(a.as_str(), "pho-bo");
        assert_eq!(a.to_string(), "pho-bo");
    }

    #[test]
    fn slugs_work_as_set_members() {
        let set: FxHashSet<ProductSlug> =
            ["pho-bo", "banh-mi"].into_iter().map(Into::into).collect();

        assert!(set.contains(&ProductSlug::from("banh-mi")));
        assert!(!set.contains(&ProductSlug::from("com-tam")));
    }
}
