use std::ops::RangeInclusive;

// Unicode "Arabic" block
const ARABIC_BLOCK: RangeInclusive<char> = '\u{0600}'..='\u{06FF}';

/// True if `text` contains at least one codepoint from the Arabic block.
pub fn is_arabic(text: &str) -> bool {
    text.chars().any(|c| ARABIC_BLOCK.contains(&c))
}
