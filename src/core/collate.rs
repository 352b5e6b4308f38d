//! Locale-aware string ordering used by the table sort.
//!
//! A small collation in the spirit of the Unicode default ordering, tuned
//! for the Latin scripts that appear in partner records:
//!
//! 1. **primary**: base letters, case- and accent-insensitive; whitespace
//!    and punctuation sort before digits, digits before letters.
//! 2. **secondary**: unaccented before accented (`e` < `é`).
//! 3. **tertiary**: lowercase before uppercase (`a` < `A`).
//! 4. finally the raw code points, so only identical strings compare equal.
//!
//! Digits are compared character by character, never as numbers:
//! `"10"` sorts before `"2"`.

use std::cmp::Ordering;

/// Compare two strings the way a user-facing, locale-aware sort would.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let ka = keys(a);
    let kb = keys(b);

    let primary = ka
        .iter()
        .flat_map(|k| k.base.iter().map(move |&c| (k.class, c)))
        .cmp(kb.iter().flat_map(|k| k.base.iter().map(move |&c| (k.class, c))));

    primary
        .then_with(|| ka.iter().map(|k| k.accented).cmp(kb.iter().map(|k| k.accented)))
        .then_with(|| ka.iter().map(|k| k.upper).cmp(kb.iter().map(|k| k.upper)))
        .then_with(|| a.cmp(b))
}

// ───────────────────────────────────────── keys ──────────────

/// Character class, in primary sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Class {
    Space,
    Punct,
    Digit,
    Letter,
}

#[derive(Debug)]
struct CharKey {
    class: Class,
    /// Folded base characters (one char may expand, e.g. `œ` → `oe`).
    base: Vec<char>,
    accented: bool,
    upper: bool,
}

fn keys(s: &str) -> Vec<CharKey> {
    s.chars().map(char_key).collect()
}

fn char_key(c: char) -> CharKey {
    let upper = c.is_uppercase();
    let lower = c.to_lowercase().next().unwrap_or(c);
    let (base, accented) = fold(lower);
    let class = if c.is_whitespace() {
        Class::Space
    } else if c.is_ascii_digit() {
        Class::Digit
    } else if c.is_alphanumeric() {
        Class::Letter
    } else {
        Class::Punct
    };
    CharKey {
        class,
        base,
        accented,
        upper,
    }
}

/// Strip diacritics from a lowercase Latin character.
fn fold(c: char) -> (Vec<char>, bool) {
    let base = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        'æ' => return (vec!['a', 'e'], true),
        'œ' => return (vec!['o', 'e'], true),
        'ß' => return (vec!['s', 's'], true),
        other => return (vec![other], false),
    };
    (vec![base], true)
}
