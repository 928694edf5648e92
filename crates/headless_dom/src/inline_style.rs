//! Inline `style` declaration blocks.

use autosize::StylePriority;
use std::collections::HashMap;

/// A single declaration from a `style` attribute or a CSSOM `setProperty`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name normalized to ASCII lowercase.
    pub property: String,
    /// Value trimmed of surrounding whitespace, without `!important`.
    pub value: String,
    pub priority: StylePriority,
}

/// Parse the value of a `style` attribute into a list of declarations.
///
/// Minimal and resilient:
/// - Splits on semicolons into declaration items.
/// - Splits each item on the first colon into property and value.
/// - Recognizes a trailing `!important`.
/// - Skips items with no colon, an empty property or an empty value.
pub fn parse_style_attribute(input: &str) -> Vec<Declaration> {
    let mut out: Vec<Declaration> = Vec::new();
    for raw_item in input.split(';') {
        let Some((raw_property, raw_value)) = raw_item.split_once(':') else {
            continue;
        };
        let property = raw_property.trim().to_ascii_lowercase();
        let (value, priority) = split_priority(raw_value.trim());
        if property.is_empty() || value.is_empty() {
            continue;
        }
        out.push(Declaration {
            property,
            value: value.to_owned(),
            priority,
        });
    }
    out
}

fn split_priority(value: &str) -> (&str, StylePriority) {
    if let Some(bang) = value.rfind('!')
        && value[bang + 1..].trim().eq_ignore_ascii_case("important")
    {
        return (value[..bang].trim_end(), StylePriority::Important);
    }
    (value, StylePriority::Normal)
}

/// The inline declaration block of one element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: HashMap<String, (String, StylePriority)>,
}

impl InlineStyle {
    /// Build a block from a `style` attribute; later duplicates win unless an
    /// earlier one is important and the later one is not.
    pub fn parse(input: &str) -> Self {
        let mut style = Self::default();
        for declaration in parse_style_attribute(input) {
            let keeps_important = matches!(
                style.declarations.get(&declaration.property),
                Some((_, StylePriority::Important))
            ) && declaration.priority == StylePriority::Normal;
            if !keeps_important {
                style.declarations.insert(
                    declaration.property,
                    (declaration.value, declaration.priority),
                );
            }
        }
        style
    }

    /// CSSOM `setProperty`: replaces the declaration, priority included. An
    /// empty value removes it.
    pub fn set_property(&mut self, name: &str, value: &str, priority: StylePriority) {
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();
        if value.is_empty() {
            self.declarations.remove(&name);
        } else {
            self.declarations.insert(name, (value.to_owned(), priority));
        }
    }

    pub fn remove_property(&mut self, name: &str) -> Option<String> {
        self.declarations
            .remove(&name.to_ascii_lowercase())
            .map(|(value, _)| value)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations.get(name).map(|(value, _)| value.as_str())
    }

    pub fn priority(&self, name: &str) -> Option<StylePriority> {
        self.declarations.get(name).map(|(_, priority)| *priority)
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}
