//! Client-side checks on a logbook entry before anything is sent.

/// Longest entry accepted, in whitespace-separated words.
pub const MAX_WORDS: usize = 300;

pub const TOO_LONG_MESSAGE: &str = "Log book entry must not exceed 300 words.";

pub const ORG_NOT_FOUND_MESSAGE: &str = "Organisation not found.";

pub fn word_count(entry: &str) -> usize { entry.split_whitespace().count() }

/// The `log_entry` error for `entry`, if it is too long.
pub fn check_entry(entry: &str) -> Option<&'static str> {
  (word_count(entry) > MAX_WORDS).then_some(TOO_LONG_MESSAGE)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn three_hundred_words_is_the_limit() {
    let at_limit = vec!["word"; MAX_WORDS].join(" ");
    let over = format!("{at_limit} more");
    assert_eq!(check_entry(&at_limit), None);
    assert_eq!(check_entry(&over), Some(TOO_LONG_MESSAGE));
  }

  #[test]
  fn runs_of_whitespace_are_one_separator() {
    assert_eq!(word_count("  one \n\n two\tthree  "), 3);
    assert_eq!(word_count(""), 0);
  }
}
