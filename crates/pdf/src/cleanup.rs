use unicode_normalization::UnicodeNormalization;

/// Presentation-form ligatures and their expansions.
const LIGATURES: [(char, &str); 7] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Clean up the text of one decoded span.
///
/// Applies NFC normalization, expands ligatures, turns tabs and other
/// whitespace controls into plain spaces, and drops the replacement
/// character, soft hyphens, and remaining control characters.  Leading and
/// trailing spaces are kept because they carry word boundaries between spans.
pub fn clean_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.nfc() {
        if let Some((_, expansion)) = LIGATURES.iter().find(|(lig, _)| *lig == c) {
            result.push_str(expansion);
            continue;
        }
        match c {
            '\u{FFFD}' | '\u{00AD}' | '\u{200B}' | '\u{FEFF}' => {}
            '\t' | '\n' | '\r' | '\u{00A0}' | '\u{2007}' | '\u{202F}' => result.push(' '),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }
    result
}
