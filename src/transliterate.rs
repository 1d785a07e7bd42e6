//! Cyrillic to Latin transliteration for the built-in PDF fonts.
//!
//! The standard fourteen PDF fonts only cover a Latin code page, so text in Russian has to be
//! rewritten before it can be drawn with them. The table follows the same scheme as the catalog
//! file names (`ц` -> `c`, `х` -> `kh`, soft and hard signs dropped).

/// Returns the Latin replacement for a lower-case Russian letter.
fn lower_letter(letter: char) -> Option<&'static str> {
    let mapped = match letter {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "c",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' => "",
        'ы' => "y",
        'ь' => "",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(mapped)
}

fn punctuation(symbol: char) -> Option<&'static str> {
    let mapped = match symbol {
        '—' | '–' => "-",
        '«' | '»' | '“' | '”' | '„' => "\"",
        '’' => "'",
        '№' => "No.",
        '…' => "...",
        '\u{a0}' => " ",
        _ => return None,
    };
    Some(mapped)
}

fn push_capitalized(out: &mut String, latin: &str) {
    let mut chars = latin.chars();
    if let Some(first) = chars.next() {
        out.push(first.to_ascii_uppercase());
        out.push_str(chars.as_str());
    }
}

/// Rewrites `text` so that it only contains ASCII characters.
///
/// Russian letters are replaced through the fixed table, upper-case letters keep their case on
/// the first Latin character (`Щ` -> `Shch`). ASCII passes through untouched and a handful of
/// typographic symbols are mapped to their ASCII look-alikes; anything else is dropped.
pub fn transliterate(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch);
        } else if let Some(latin) = lower_letter(ch) {
            out.push_str(latin);
        } else if let Some(latin) = ch.to_lowercase().next().and_then(lower_letter) {
            push_capitalized(&mut out, latin);
        } else if let Some(ascii) = punctuation(ch) {
            out.push_str(ascii);
        }
    }

    out
}

/// Indicates whether `text` contains characters the built-in fonts cannot draw.
pub fn needs_transliteration(text: &str) -> bool {
    !text.is_ascii()
}
