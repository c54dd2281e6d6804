//! Character references: `&name;` and `&#digits;`.
//!
//! Only a small fixed table of named references is understood. A `&`
//! that does not start a recognized reference is an ordinary character.

/// Named references and the characters they stand for.
pub const NAMED_ENTITIES: &[(&str, char)] = &[
    ("gt", '>'),
    ("lt", '<'),
    ("quot", '"'),
    ("amp", '&'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201c}'),
    ("rdquo", '\u{201d}'),
    ("ndash", '\u{2013}'),
    ("mdash", '\u{2014}'),
    ("ne", '\u{2260}'),
    ("le", '\u{2264}'),
    ("ge", '\u{2265}'),
    ("copy", '\u{a9}'),
    ("reg", '\u{ae}'),
    ("trade", '\u{2122}'),
    ("nbsp", '\u{a0}'),
];

/// Longest digit string considered for a numeric reference.
const MAX_NUMERIC_LEN: usize = 10;

/// Result of looking for a reference at a `&`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityMatch {
    /// A reference decoded to `ch`; `len` chars were consumed, from the
    /// `&` through the `;`.
    Decoded {
        /// The decoded character.
        ch: char,
        /// Chars consumed, including `&` and `;`.
        len: usize,
    },
    /// `&#…;` whose body is not a valid decimal code point.
    Unparsable {
        /// The text between `&#` and `;`.
        body: String,
        /// Chars consumed, including `&` and `;`.
        len: usize,
    },
    /// Not a reference; the `&` is literal.
    Literal,
}

/// Look for a character reference starting at `chars[at]`, which must be `&`.
#[must_use]
pub fn resolve_entity(chars: &[char], at: usize) -> EntityMatch {
    let rest = chars.get(at + 1..).unwrap_or_default();
    match rest.first() {
        Some('#') => resolve_numeric(&rest[1..]),
        Some(_) => resolve_named(rest),
        None => EntityMatch::Literal,
    }
}

fn resolve_numeric(body: &[char]) -> EntityMatch {
    let Some(end) = body
        .iter()
        .take(MAX_NUMERIC_LEN + 1)
        .position(|&c| c == ';' || c == '<' || c == '&' || c.is_whitespace())
    else {
        return EntityMatch::Literal;
    };
    if body[end] != ';' {
        return EntityMatch::Literal;
    }

    let digits: String = body[..end].iter().collect();
    // "&#" + digits + ";"
    let len = end + 3;
    let decoded = if digits.bytes().all(|b| b.is_ascii_digit()) {
        digits.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    };
    match decoded {
        Some(ch) => EntityMatch::Decoded { ch, len },
        None => EntityMatch::Unparsable { body: digits, len },
    }
}

fn resolve_named(rest: &[char]) -> EntityMatch {
    for &(name, ch) in NAMED_ENTITIES {
        let n = name.len();
        if rest.len() > n && rest[n] == ';' && rest[..n].iter().copied().eq(name.chars()) {
            return EntityMatch::Decoded { ch, len: n + 2 };
        }
    }
    EntityMatch::Literal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_named_entities() {
        assert_eq!(
            resolve_entity(&chars("&amp;x"), 0),
            EntityMatch::Decoded { ch: '&', len: 5 }
        );
        assert_eq!(
            resolve_entity(&chars("a&trade;"), 1),
            EntityMatch::Decoded { ch: '\u{2122}', len: 7 }
        );
        assert_eq!(
            resolve_entity(&chars("&ne;"), 0),
            EntityMatch::Decoded { ch: '\u{2260}', len: 4 }
        );
    }

    #[test]
    fn test_named_entity_requires_semicolon() {
        assert_eq!(resolve_entity(&chars("&amp x"), 0), EntityMatch::Literal);
        assert_eq!(resolve_entity(&chars("&amp"), 0), EntityMatch::Literal);
        assert_eq!(resolve_entity(&chars("&bogus;"), 0), EntityMatch::Literal);
        assert_eq!(resolve_entity(&chars("&"), 0), EntityMatch::Literal);
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(
            resolve_entity(&chars("&#65;"), 0),
            EntityMatch::Decoded { ch: 'A', len: 5 }
        );
        assert_eq!(
            resolve_entity(&chars("&#8222;"), 0),
            EntityMatch::Decoded { ch: '\u{201e}', len: 7 }
        );
    }

    #[test]
    fn test_numeric_entity_unparsable() {
        assert_eq!(
            resolve_entity(&chars("&#x41;"), 0),
            EntityMatch::Unparsable {
                body: "x41".to_string(),
                len: 6
            }
        );
        // Surrogate code points are not characters.
        assert!(matches!(
            resolve_entity(&chars("&#55296;"), 0),
            EntityMatch::Unparsable { .. }
        ));
    }

    #[test]
    fn test_numeric_entity_without_semicolon_is_literal() {
        assert_eq!(resolve_entity(&chars("&#65 "), 0), EntityMatch::Literal);
        assert_eq!(resolve_entity(&chars("&#65<b>"), 0), EntityMatch::Literal);
    }
}
