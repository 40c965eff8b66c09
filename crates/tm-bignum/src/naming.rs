//! Long-scale number-name synthesis.
//!
//! Names for powers of ten up to 10^30 come from a fixed word table.  Past
//! that the names are synthesized from Latin roots, one morpheme triple per
//! base-1000 digit of the zillion index `n` (where the named power is
//! `10^(3n+3)`): `n = 10` → `decillion`, `n = 103` → `trescentillion`,
//! `n = 1000` → `millinillion`.
//!
//! # Assembly rules
//!
//! Each triple of `n` (most significant first) becomes a fragment:
//!
//! - triple 0 → `nilli`;
//! - triple 1–9 → the classic prefix (`mi`, `bi`, `tri`, …);
//! - triple 10–999 → units root + tens root + hundreds root.
//!
//! Where a units root meets the following tens/hundreds root a connector
//! letter may appear, chosen by matching the letters the units root can take
//! against the marker class of the next root: `septe`/`nove` take `m` or
//! `n` (`septemviginti`, `septendeci`), `tre` takes `s` before an s/x root
//! (`trestriginta`), `se` takes `s` or `x` (`sesquadraginta`, `sexcenti`).
//! A fragment's trailing vowel is dropped before the linking
//! `illi`, and the whole name terminates in `on` (so the final link reads
//! `illion`).
//!
//! The connector tables follow the Conway–Wechsler convention, which is the
//! de-facto standard for extending the dictionary names.

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};

// ── Fixed word table (10^3 … 10^30) ──────────────────────────────────────────

/// Dictionary names indexed by `exponent / 3`; index 10 (`nonillion`) is the
/// last table entry before synthesis takes over.
const WORDS: [&str; 11] = [
    "",
    "thousand",
    "million",
    "billion",
    "trillion",
    "quadrillion",
    "quintillion",
    "sextillion",
    "septillion",
    "octillion",
    "nonillion",
];

// ── Morpheme tables ───────────────────────────────────────────────────────────

/// Classic prefixes for a 1–9 triple.
const SMALL_PREFIXES: [&str; 10] = [
    "", "mi", "bi", "tri", "quadri", "quinti", "sexti", "septi", "octi", "noni",
];

/// Units roots for the ones digit of a 10–999 triple.
const UNITS: [&str; 10] = [
    "", "un", "duo", "tre", "quattuor", "quin", "se", "septe", "octo", "nove",
];

/// Tens roots with the marker class they present to a preceding units root.
const TENS: [(&str, &str); 10] = [
    ("", ""),
    ("deci", "n"),
    ("viginti", "ms"),
    ("triginta", "ns"),
    ("quadraginta", "ns"),
    ("quinquaginta", "ns"),
    ("sexaginta", "n"),
    ("septuaginta", "n"),
    ("octoginta", "mx"),
    ("nonaginta", ""),
];

/// Hundreds roots with their marker class.
const HUNDREDS: [(&str, &str); 10] = [
    ("", ""),
    ("centi", "nx"),
    ("ducenti", "n"),
    ("trecenti", "ns"),
    ("quadringenti", "ns"),
    ("quingenti", "ns"),
    ("sescenti", "n"),
    ("septingenti", "n"),
    ("octingenti", "mx"),
    ("nongenti", ""),
];

// ── Public API ────────────────────────────────────────────────────────────────

/// Dictionary word for `10^(3 × group)`, if the group is within the fixed
/// table (`group ≤ 10`).
pub fn table_word(group: &BigInt) -> Option<&'static str> {
    let idx = group.to_usize()?;
    if (1..WORDS.len()).contains(&idx) {
        Some(WORDS[idx])
    } else {
        None
    }
}

/// Synthesize the name of `10^(3n + 3)` for any positive zillion index `n`.
///
/// `synthesize(1)` is `million`, `synthesize(10)` is `decillion`,
/// `synthesize(1000)` is `millinillion`; the function is defined for
/// arbitrarily large `n`.
pub fn synthesize(n: &BigInt) -> String {
    debug_assert!(*n > BigInt::zero());

    // Base-1000 digits, most significant first.
    let thousand = BigInt::from(1000);
    let mut triples = Vec::new();
    let mut rest = n.clone();
    while !rest.is_zero() {
        let triple = (&rest % &thousand).to_u16().unwrap_or(0);
        triples.push(triple);
        rest /= &thousand;
    }
    triples.reverse();

    let mut name = String::with_capacity(triples.len() * 12);
    for triple in triples {
        name.push_str(&triple_fragment(triple));
    }
    name.push_str("on");
    name
}

// ── Fragment assembly ─────────────────────────────────────────────────────────

/// Build one `…illi` fragment for a base-1000 digit of the zillion index.
fn triple_fragment(triple: u16) -> String {
    if triple == 0 {
        return "nilli".to_string();
    }

    let mut fragment = if triple < 10 {
        SMALL_PREFIXES[triple as usize].to_string()
    } else {
        let units = (triple % 10) as usize;
        let tens = ((triple / 10) % 10) as usize;
        let hundreds = (triple / 100) as usize;

        let mut s = String::new();
        if units > 0 {
            s.push_str(UNITS[units]);
            let next_markers = if tens > 0 {
                TENS[tens].1
            } else {
                HUNDREDS[hundreds].1
            };
            s.push_str(connector(units, next_markers));
        }
        s.push_str(TENS[tens].0);
        s.push_str(HUNDREDS[hundreds].0);
        s
    };

    if fragment.ends_with(['a', 'e', 'i', 'o', 'u']) {
        fragment.pop();
    }
    fragment.push_str("illi");
    fragment
}

/// Euphonic connector between a units root and the marker class of the
/// following tens/hundreds root.
fn connector(units: usize, next_markers: &str) -> &'static str {
    match units {
        // tre → tres before an s- or x-marked root.
        3 if next_markers.contains('s') || next_markers.contains('x') => "s",
        // se → ses / sex.
        6 if next_markers.contains('s') => "s",
        6 if next_markers.contains('x') => "x",
        // septe / nove → septem, novem / septen, noven.
        7 | 9 if next_markers.contains('m') => "m",
        7 | 9 if next_markers.contains('n') => "n",
        _ => "",
    }
}
