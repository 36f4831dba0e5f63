//! Composition settings.

use std::borrow::Cow;

/// Case handling for text containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseSensitivity {
    /// Both sides are lowercased before the containment test.
    #[default]
    Insensitive,
    /// Ordinal, byte-for-byte containment.
    Sensitive,
}

impl CaseSensitivity {
    /// Tests whether `haystack` contains `needle` under this policy.
    pub fn contains(self, haystack: &str, needle: &str) -> bool {
        match self {
            CaseSensitivity::Sensitive => haystack.contains(needle),
            CaseSensitivity::Insensitive => {
                haystack.to_lowercase().contains(&needle.to_lowercase())
            }
        }
    }
}

/// Settings applied when descriptors are built into expressions.
///
/// ```
/// use sift::{CaseSensitivity, ComposeOptions};
///
/// let options = ComposeOptions::new()
///     .case_sensitivity(CaseSensitivity::Sensitive)
///     .param_name("person");
/// assert_eq!(options.param_name_str(), "person");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeOptions {
    contains: CaseSensitivity,
    param_name: Cow<'static, str>,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        ComposeOptions {
            contains: CaseSensitivity::default(),
            param_name: Cow::Borrowed("item"),
        }
    }
}

impl ComposeOptions {
    /// Creates the default options: case-insensitive containment, parameter
    /// named `item`.
    pub fn new() -> Self {
        ComposeOptions::default()
    }

    /// Sets the case policy used by `Contains`.
    pub fn case_sensitivity(mut self, policy: CaseSensitivity) -> Self {
        self.contains = policy;
        self
    }

    /// Sets the display name of the parameter new predicates bind.
    pub fn param_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.param_name = name.into();
        self
    }

    /// Returns the case policy used by `Contains`.
    pub fn contains_policy(&self) -> CaseSensitivity {
        self.contains
    }

    /// Returns the parameter display name.
    pub fn param_name_str(&self) -> &str {
        &self.param_name
    }

    pub(crate) fn param_name_owned(&self) -> Cow<'static, str> {
        self.param_name.clone()
    }
}
