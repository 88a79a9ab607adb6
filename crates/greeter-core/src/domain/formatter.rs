//! Greeting rendering.

use crate::domain::{
    error::DomainError,
    policy::GreetingPolicy,
    value_objects::{GreetingMessage, GreetingStyle, ValidatedName},
};

/// Renders a style into final greeting text.
pub struct GreetingFormatter;

impl GreetingFormatter {
    /// Upper bound on a rendered greeting, in characters.
    pub const MAX_LENGTH: usize = 200;

    /// Render `name` in `style`.
    ///
    /// Fails with [`DomainError::MessageTooLong`] instead of truncating.
    pub fn format(
        name: &ValidatedName,
        style: GreetingStyle,
    ) -> Result<GreetingMessage, DomainError> {
        let text = match style {
            GreetingStyle::Default => format!("Hello World from {name}!"),
            GreetingStyle::Friendly => format!("Hey there, {name}! Welcome!"),
            GreetingStyle::Formal => format!("Greetings, {name}. Welcome to the application."),
        };

        let length = text.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(DomainError::MessageTooLong {
                length,
                max: Self::MAX_LENGTH,
            });
        }

        Ok(GreetingMessage::new_unchecked(text, style))
    }

    /// Choose the style with [`GreetingPolicy`] and render it.
    pub fn greet(name: &ValidatedName) -> Result<GreetingMessage, DomainError> {
        Self::format(name, GreetingPolicy::determine_style(name))
    }
}
