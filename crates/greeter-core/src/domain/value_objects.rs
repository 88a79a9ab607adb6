//! Domain value objects: ValidatedName, GreetingStyle, GreetingMessage.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. None of
//! them can be built from arbitrary input; the only ways in are the
//! validator (`NameValidator`), the formatter (`GreetingFormatter`) and the
//! `ValidatedName::anonymous` factory.

use std::fmt;

// ── ValidatedName ────────────────────────────────────────────────────────────

/// A name that satisfies the domain's character and length rules.
///
/// The inner string is already trimmed, 1–100 characters long, and made only
/// of ASCII letters, whitespace, hyphens and apostrophes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidatedName {
    value: String,
}

impl ValidatedName {
    /// Literal used when no usable name was supplied.
    pub const ANONYMOUS: &'static str = "Anonymous";

    /// Crate-private constructor; callers go through `NameValidator`.
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self { value }
    }

    /// The sentinel name. Bypasses validation.
    pub fn anonymous() -> Self {
        Self::new_unchecked(Self::ANONYMOUS.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

impl fmt::Display for ValidatedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for ValidatedName {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

// ── GreetingStyle ────────────────────────────────────────────────────────────

/// The tone of a greeting, chosen by `GreetingPolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GreetingStyle {
    Default,
    Friendly,
    Formal,
}

impl GreetingStyle {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Friendly => "friendly",
            Self::Formal => "formal",
        }
    }
}

impl fmt::Display for GreetingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── GreetingMessage ──────────────────────────────────────────────────────────

/// A finished greeting, at most `GreetingFormatter::MAX_LENGTH` characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingMessage {
    text: String,
    style: GreetingStyle,
}

impl GreetingMessage {
    pub(crate) fn new_unchecked(text: String, style: GreetingStyle) -> Self {
        Self { text, style }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> GreetingStyle {
        self.style
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for GreetingMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for GreetingMessage {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
