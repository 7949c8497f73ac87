// File: contactguard-core/src/validators.rs
//! Programmatic validation for regex candidates.
//!
//! The `regex` crate has no look-around, so conditions such as "not preceded
//! by a word character" or "plausible digit count" are checked here on each
//! candidate span. A candidate that fails validation is left in the text.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::category::Category;

/// Fewest digits a phone number can have (local numbers without area code).
pub const MIN_PHONE_DIGITS: usize = 7;
/// Most digits accepted without an explicit `+` country code.
pub const MAX_PHONE_DIGITS: usize = 13;
/// Most digits accepted when the candidate starts with `+` (E.164 limit).
pub const MAX_INTERNATIONAL_PHONE_DIGITS: usize = 15;

static CURRENCY_SIGNS: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut set = HashSet::new();
    set.extend(['$', '€', '£', '¥', '₹', '₩', '₽', '¢']);
    set
});

/// Currency codes and names, lowercase. A number next to one is an amount.
static CURRENCY_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "usd", "eur", "gbp", "inr", "rs", "rp", "jpy", "cny", "rmb", "aud", "cad", "chf", "nzd",
        "sgd", "hkd", "aed", "sar", "pkr", "bdt", "lkr", "npr", "ngn", "kes", "zar", "brl", "mxn",
        "rub", "krw", "try", "idr", "php", "thb", "myr", "vnd", "sek", "nok", "dkk", "pln", "czk",
        "huf", "ils", "egp", "dollar", "dollars", "euro", "euros", "pound", "pounds", "rupee",
        "rupees", "bucks",
    ]
    .into_iter()
    .collect()
});

/// Count and unit words, lowercase. A bare digit run followed by one is a quantity.
static COUNT_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "followers", "follower", "subs", "subscribers", "views", "viewers", "likes", "impressions",
        "reach", "users", "downloads", "streams", "plays", "fans", "members", "people", "copies",
        "units", "pieces", "items", "posts", "reels", "stories", "videos", "words", "comments",
        "shares", "clicks", "visits", "visitors", "sales", "orders", "customers", "listeners",
        "readers", "hits", "points", "steps", "times", "tokens", "records", "rows", "bytes",
        "pixels", "px", "km", "miles", "kg", "mah",
    ]
    .into_iter()
    .collect()
});

/// Dispatches to the validator for a rule's category.
///
/// Categories without a validator accept every candidate.
pub fn validate_candidate(category: Category, haystack: &str, start: usize, end: usize) -> bool {
    match category {
        Category::Phone => is_plausible_phone_number(haystack, start, end),
        Category::SocialHandle => is_standalone_handle(haystack, start),
        Category::Email | Category::Keyword => true,
    }
}

/// Same notion of "word character" as the regex `\w` class, for the cases we care about.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Checks a phone-shaped candidate `haystack[start..end]`.
///
/// Letters glued to the number do not protect it (`call5551234567`), but a
/// neighbouring digit or underscore, an identifier prefix (`ABC12345678`),
/// a price, a percentage, a quantity, an implausible digit count, a date or
/// a run of years all reject it.
pub fn is_plausible_phone_number(haystack: &str, start: usize, end: usize) -> bool {
    let Some(candidate) = haystack.get(start..end) else { return false; };

    let glued_before = glued_word_before(haystack, start);
    if !glued_before.is_empty() && !is_letter_prefix(&glued_before) {
        return false;
    }

    let mut before = haystack[..start].chars().rev();
    let prev = before.next();
    let prev_significant = match prev {
        Some(c) if c.is_whitespace() => before.next(),
        other => other,
    };
    if prev_significant.is_some_and(|c| CURRENCY_SIGNS.contains(&c)) {
        return false;
    }

    let mut after = haystack[end..].chars();
    let next = after.next();
    if next.is_some_and(|c| c == '%' || (is_word_char(c) && !c.is_alphabetic())) {
        return false;
    }
    let next_significant = match next {
        Some(c) if c.is_whitespace() => after.next(),
        other => other,
    };
    if next_significant.is_some_and(|c| CURRENCY_SIGNS.contains(&c)) {
        return false;
    }

    let word_before = word_before(haystack, start).to_lowercase();
    let word_after = word_after(haystack, end).to_lowercase();
    if CURRENCY_WORDS.contains(word_before.as_str()) || CURRENCY_WORDS.contains(word_after.as_str()) {
        return false;
    }

    let digits = candidate.chars().filter(|c| c.is_numeric()).count();
    let max_digits = if candidate.starts_with('+') {
        MAX_INTERNATIONAL_PHONE_DIGITS
    } else {
        MAX_PHONE_DIGITS
    };
    if !(MIN_PHONE_DIGITS..=max_digits).contains(&digits) {
        return false;
    }

    if candidate.chars().all(char::is_numeric) && digits <= 9 && COUNT_WORDS.contains(word_after.as_str()) {
        return false;
    }

    let groups = digit_groups(candidate);
    !(is_date_shaped(candidate, &groups)
        || is_year_run(&groups)
        || is_decimal_amount(candidate, &groups)
        || is_round_number_list(candidate, &groups))
}

/// Word characters directly attached to the left of `start`.
fn glued_word_before(haystack: &str, start: usize) -> String {
    let mut chars: Vec<char> = haystack[..start]
        .chars()
        .rev()
        .take_while(|c| is_word_char(*c))
        .collect();
    chars.reverse();
    chars.into_iter().collect()
}

/// A glued prefix made of letters only, and not an identifier prefix such
/// as a single letter or a short uppercase code (`A`, `PO`, `SKU`).
fn is_letter_prefix(prefix: &str) -> bool {
    let len = prefix.chars().count();
    let identifier = len == 1 || (len <= 3 && prefix.chars().all(char::is_uppercase));
    prefix.chars().all(char::is_alphabetic)
        && !identifier
        && !CURRENCY_WORDS.contains(prefix.to_lowercase().as_str())
}

/// The letter run before `start`, skipping whitespace, `.` and `:` (`Rs. 4500000`).
fn word_before(haystack: &str, start: usize) -> String {
    let mut chars: Vec<char> = haystack[..start]
        .chars()
        .rev()
        .skip_while(|c| c.is_whitespace() || matches!(c, '.' | ':'))
        .take_while(|c| c.is_alphabetic())
        .collect();
    chars.reverse();
    chars.into_iter().collect()
}

/// The letter run after `end`, skipping whitespace.
fn word_after(haystack: &str, end: usize) -> String {
    haystack[end..]
        .chars()
        .skip_while(|c| c.is_whitespace())
        .take_while(|c| c.is_alphabetic())
        .collect()
}

/// Checks that an `@handle` candidate starting at `start` is not glued to a
/// preceding word (which would make it part of an email or another token).
pub fn is_standalone_handle(haystack: &str, start: usize) -> bool {
    match haystack.get(..start) {
        Some(prefix) => !prefix.chars().next_back().is_some_and(is_word_char),
        None => false,
    }
}

fn digit_groups(candidate: &str) -> Vec<&str> {
    candidate
        .split(|c: char| !c.is_numeric())
        .filter(|g| !g.is_empty())
        .collect()
}

fn parse_ascii(group: &str) -> Option<u32> {
    if group.bytes().all(|b| b.is_ascii_digit()) {
        group.parse().ok()
    } else {
        None
    }
}

/// `YYYY-MM-DD`, `DD.MM.YYYY`, `MM-DD-YY` and friends with one consistent separator.
fn is_date_shaped(candidate: &str, groups: &[&str]) -> bool {
    let [a, b, c] = groups else { return false; };

    let separators: HashSet<char> = candidate
        .chars()
        .filter(|ch| !ch.is_numeric())
        .collect();
    if separators.len() != 1 || candidate.starts_with('+') || candidate.starts_with('(') {
        return false;
    }

    let (Some(x), Some(y), Some(z)) = (parse_ascii(a), parse_ascii(b), parse_ascii(c)) else {
        return false;
    };

    let month_day = |m: u32, d: u32| (1..=12).contains(&m) && (1..=31).contains(&d);

    if a.len() == 4 && b.len() <= 2 && c.len() <= 2 {
        return month_day(y, z);
    }
    if a.len() <= 2 && b.len() <= 2 && matches!(c.len(), 2 | 4) {
        return month_day(y, x) || month_day(x, y);
    }
    false
}

/// `12345.67`: one dot followed by exactly two digits.
fn is_decimal_amount(candidate: &str, groups: &[&str]) -> bool {
    let [_, cents] = groups else { return false; };
    cents.chars().count() == 2 && candidate.chars().filter(|c| !c.is_numeric()).eq(['.'])
}

/// `100 200 300 400`: three or more equal-width multiples of ten split by spaces.
fn is_round_number_list(candidate: &str, groups: &[&str]) -> bool {
    if groups.len() < 3 || !candidate.chars().all(|c| c.is_numeric() || c.is_whitespace()) {
        return false;
    }
    let width = groups[0].len();
    groups.iter().all(|g| {
        g.len() == width && !g.starts_with('0') && parse_ascii(g).is_some_and(|n| n % 10 == 0)
    })
}

/// `1999-2005`, `2019 2020 2021`: only four-digit years.
fn is_year_run(groups: &[&str]) -> bool {
    groups.len() >= 2
        && groups.iter().all(|g| {
            g.len() == 4 && parse_ascii(g).is_some_and(|y| (1900..=2099).contains(&y))
        })
}
