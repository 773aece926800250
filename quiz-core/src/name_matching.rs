use quiz_types::Player;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Guesses shorter than this (after normalization) never match anything
pub const MIN_GUESS_LENGTH: usize = 3;

/// Shortest word considered by the per-word fallback
const MIN_WORD_LENGTH: usize = 3;

/// Floor of the whole-string edit tolerance
const MIN_TOLERANCE: usize = 2;

/// Which check accepted a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Exact,
    Substring,
    FullDistance,
    WordDistance,
}

/// Lower-case, strip diacritics, keep only `[a-z0-9]` and whitespace, trim.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Single-character edit distance (insert, delete, substitute). Callers normalize first.
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Check whether `guess` names the same person as any of `aliases`
pub fn is_match<S: AsRef<str>>(guess: &str, aliases: &[S]) -> bool {
    NameMatcher::new(aliases).matches(guess)
}

/// Matcher holding the pre-normalized accepted names of one player
#[derive(Debug, Clone)]
pub struct NameMatcher {
    normalized_aliases: Vec<String>,
}

impl NameMatcher {
    /// Create a matcher from a list of accepted names.
    ///
    /// Names that normalize to nothing (e.g. `"???"`) are dropped and never match.
    /// This departs from the plain substring rule, under which an empty alias
    /// would be contained in every guess and accept anything.
    pub fn new<S: AsRef<str>>(aliases: &[S]) -> Self {
        let normalized_aliases = aliases
            .iter()
            .map(|alias| normalize(alias.as_ref()))
            .filter(|alias| !alias.is_empty())
            .collect();

        Self { normalized_aliases }
    }

    /// Matcher over the canonical name and every alias of a player
    pub fn for_player(player: &Player) -> Self {
        Self::new(&player.accepted_names())
    }

    /// Check if the guess identifies the player
    pub fn matches(&self, guess: &str) -> bool {
        self.match_rule(guess).is_some()
    }

    /// The first rule that accepts the guess, trying each alias in order
    pub fn match_rule(&self, guess: &str) -> Option<MatchRule> {
        let guess = normalize(guess);
        if guess.chars().count() < MIN_GUESS_LENGTH {
            return None;
        }

        self.normalized_aliases
            .iter()
            .find_map(|alias| Self::match_alias(&guess, alias))
    }

    fn match_alias(guess: &str, alias: &str) -> Option<MatchRule> {
        if guess == alias {
            return Some(MatchRule::Exact);
        }

        // Partial names: surname-only guesses, or a guess longer than a short alias
        if alias.contains(guess) || guess.contains(alias) {
            return Some(MatchRule::Substring);
        }

        // Longer names tolerate proportionally more typos
        let longest = guess.chars().count().max(alias.chars().count());
        let tolerance = MIN_TOLERANCE.max(longest / 4);
        if edit_distance(guess, alias) <= tolerance {
            return Some(MatchRule::FullDistance);
        }

        // A single mistyped word against one word of a longer name
        let alias_words: Vec<&str> = alias
            .split_whitespace()
            .filter(|word| word.chars().count() >= MIN_WORD_LENGTH)
            .collect();

        for guess_word in guess
            .split_whitespace()
            .filter(|word| word.chars().count() >= MIN_WORD_LENGTH)
        {
            for alias_word in &alias_words {
                if guess_word == *alias_word || edit_distance(guess_word, alias_word) <= 1 {
                    return Some(MatchRule::WordDistance);
                }
            }
        }

        None
    }

    pub fn alias_count(&self) -> usize {
        self.normalized_aliases.len()
    }
}
