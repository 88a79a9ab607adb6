//! Greeting style selection.

use crate::domain::value_objects::{GreetingStyle, ValidatedName};

/// Maps a validated name to one of the three greeting styles.
pub struct GreetingPolicy;

impl GreetingPolicy {
    /// Names longer than this many characters are greeted formally.
    pub const FORMAL_THRESHOLD: usize = 20;

    /// Pick the style for `name`.
    ///
    /// The length rule is evaluated before the anonymous rule.
    pub fn determine_style(name: &ValidatedName) -> GreetingStyle {
        if name.char_len() > Self::FORMAL_THRESHOLD {
            GreetingStyle::Formal
        } else if name.as_str().eq_ignore_ascii_case(ValidatedName::ANONYMOUS) {
            GreetingStyle::Default
        } else {
            GreetingStyle::Friendly
        }
    }
}
