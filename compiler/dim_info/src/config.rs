//! Finder configuration.

/// What to do when two retained composite types share an identifier.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum IdentifierPolicy {
    /// Keep the first registration in compile-unit order.
    #[default]
    FirstWins,
    /// Later registrations replace earlier ones.
    Overwrite,
}

/// Options for [`Finder`](crate::Finder).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FinderConfig {
    /// Duplicate identifier handling when building the identifier map.
    pub identifier_policy: IdentifierPolicy,
    /// Walk each compile unit's enum-type list.
    pub walk_enum_types: bool,
}

impl FinderConfig {
    #[must_use]
    pub fn with_identifier_policy(mut self, policy: IdentifierPolicy) -> Self {
        self.identifier_policy = policy;
        self
    }

    #[must_use]
    pub fn with_enum_types(mut self, walk: bool) -> Self {
        self.walk_enum_types = walk;
        self
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            identifier_policy: IdentifierPolicy::FirstWins,
            walk_enum_types: true,
        }
    }
}
