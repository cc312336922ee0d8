//! # Tokenization Cleanup

/// Space-artifact patterns and their replacements, applied in order.
const CLEANUP_RULES: &[(&str, &str)] = &[
    (" .", "."),
    (" ?", "?"),
    (" !", "!"),
    (" ,", ","),
    (" ' ", "'"),
    (" n't", "n't"),
    (" 'm", "'m"),
    (" 's", "'s"),
    (" 've", "'ve"),
    (" 're", "'re"),
];

/// Remove simple English tokenization artifacts.
///
/// Joins spaces before punctuation and before contractions:
/// `"do n't stop ."` becomes `"don't stop."`.
pub fn clean_up_tokenization(text: &str) -> String {
    let mut text = text.to_string();
    for (pattern, replacement) in CLEANUP_RULES {
        if text.contains(pattern) {
            text = text.replace(pattern, replacement);
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_up_tokenization() {
        assert_eq!(
            clean_up_tokenization("hello , world ! do n't i 'm it 's we 've they 're ."),
            "hello, world! don't i'm it's we've they're."
        );
        assert_eq!(clean_up_tokenization("rock ' n roll ?"), "rock'n roll?");
        assert_eq!(clean_up_tokenization("plain"), "plain");
    }
}
