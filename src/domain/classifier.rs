//! Array classifier.
//!
//! Sorts every token of an input array into exactly one of three classes:
//!
//! - **numeric**: the trimmed text parses fully as a decimal number; it is
//!   filed as odd or even by its integer-truncated value, which is added to
//!   the running sum
//! - **alphabetic**: one or more ASCII letters and nothing else; filed
//!   upper-cased, and its letters feed the concatenation buffer
//! - **special**: anything else, filed verbatim
//!
//! Classification is a pure function of its input. It never fails and keeps
//! the input order inside every bucket.

use serde::Serialize;

use super::token::RawToken;

// =============================================================================
// Token Class
// =============================================================================

/// The class a single token string falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// A number, with its integer-truncated value.
    Numeric {
        /// Integer part of the number, saturated to the `i128` range.
        value: i128,
        /// Parity of the integer part, exact for any number of digits.
        is_even: bool,
    },
    /// One or more ASCII letters.
    Alphabetic,
    /// Neither numeric nor alphabetic.
    Special,
}

/// Classifies a single token string.
#[must_use]
pub fn classify_token(text: &str) -> TokenClass {
    if let Some(class) = parse_numeric(text) {
        class
    } else if is_alphabetic(text) {
        TokenClass::Alphabetic
    } else {
        TokenClass::Special
    }
}

/// Parses `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?` after
/// trimming surrounding whitespace.
///
/// The integer value is the signed integer part alone: `"3.7"` is 3, `"-2.9"`
/// is -2 and `"1e3"` is 1. Fractions are truncated, never rounded.
fn parse_numeric(text: &str) -> Option<TokenClass> {
    let trimmed = text.trim();
    let bytes = trimmed.as_bytes();
    let mut index = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            index += 1;
            true
        }
        Some(b'+') => {
            index += 1;
            false
        }
        _ => false,
    };

    let integer_start = index;
    index = skip_digits(bytes, index);
    let integer_digits = &trimmed[integer_start..index];

    let mut fraction_digits = 0;
    if bytes.get(index) == Some(&b'.') {
        let fraction_start = index + 1;
        index = skip_digits(bytes, fraction_start);
        fraction_digits = index - fraction_start;
    }

    if integer_digits.is_empty() && fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(index), Some(b'e' | b'E')) {
        index += 1;
        if matches!(bytes.get(index), Some(b'+' | b'-')) {
            index += 1;
        }
        let exponent_start = index;
        index = skip_digits(bytes, exponent_start);
        if index == exponent_start {
            return None;
        }
    }

    if index != bytes.len() {
        return None;
    }

    let magnitude = if integer_digits.is_empty() {
        0
    } else {
        integer_digits.parse::<i128>().unwrap_or(i128::MAX)
    };
    let last_digit = integer_digits.bytes().last().unwrap_or(b'0');

    Some(TokenClass::Numeric {
        value: if negative { -magnitude } else { magnitude },
        is_even: (last_digit - b'0') % 2 == 0,
    })
}

fn skip_digits(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|byte| !byte.is_ascii_digit())
        .map_or(bytes.len(), |offset| start + offset)
}

fn is_alphabetic(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|byte| byte.is_ascii_alphabetic())
}

// =============================================================================
// Classification Result
// =============================================================================

/// Buckets and derived values for one input array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// Numeric tokens with an odd integer value, as received.
    pub odd_numbers: Vec<String>,
    /// Numeric tokens with an even integer value, as received.
    pub even_numbers: Vec<String>,
    /// Alphabetic tokens, upper-cased.
    pub alphabets: Vec<String>,
    /// Everything else, as received.
    pub special_characters: Vec<String>,
    /// Decimal sum of the integer values of all numeric tokens.
    pub sum: String,
    /// All letters in reverse order with alternating case, lower first.
    pub concat_string: String,
}

impl ClassificationResult {
    /// Number of tokens filed across the four buckets.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.odd_numbers.len()
            + self.even_numbers.len()
            + self.alphabets.len()
            + self.special_characters.len()
    }
}

/// Classifies every token in order.
///
/// Each token is stringified, then filed into exactly one bucket. The
/// concatenation buffer collects the letters of all alphabetic tokens and is
/// reversed as a whole once every token has been seen.
pub fn classify<'a, I>(tokens: I) -> ClassificationResult
where
    I: IntoIterator<Item = &'a RawToken>,
{
    let mut accumulator = Accumulator::default();
    for token in tokens {
        accumulator.push(token.to_token_string());
    }
    accumulator.finish()
}

#[derive(Default)]
struct Accumulator {
    odd_numbers: Vec<String>,
    even_numbers: Vec<String>,
    alphabets: Vec<String>,
    special_characters: Vec<String>,
    sum: i128,
    sum_pinned: bool,
    letters: Vec<char>,
}

impl Accumulator {
    fn push(&mut self, text: String) {
        match classify_token(&text) {
            TokenClass::Numeric { value, is_even } => {
                self.add_to_sum(value);
                if is_even {
                    self.even_numbers.push(text);
                } else {
                    self.odd_numbers.push(text);
                }
            }
            TokenClass::Alphabetic => {
                self.letters.extend(text.chars());
                self.alphabets.push(text.to_ascii_uppercase());
            }
            TokenClass::Special => self.special_characters.push(text),
        }
    }

    /// Once the sum overflows it stays pinned at the bound it crossed.
    fn add_to_sum(&mut self, value: i128) {
        if self.sum_pinned {
            return;
        }
        if let Some(sum) = self.sum.checked_add(value) {
            self.sum = sum;
        } else {
            self.sum = if value > 0 { i128::MAX } else { i128::MIN };
            self.sum_pinned = true;
        }
    }

    fn finish(self) -> ClassificationResult {
        ClassificationResult {
            odd_numbers: self.odd_numbers,
            even_numbers: self.even_numbers,
            alphabets: self.alphabets,
            special_characters: self.special_characters,
            sum: self.sum.to_string(),
            concat_string: alternate_case_reversed(&self.letters),
        }
    }
}

/// Reverses the letters, then lower-cases even positions and upper-cases odd ones.
fn alternate_case_reversed(letters: &[char]) -> String {
    letters
        .iter()
        .rev()
        .enumerate()
        .map(|(position, letter)| {
            if position % 2 == 0 {
                letter.to_ascii_lowercase()
            } else {
                letter.to_ascii_uppercase()
            }
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
