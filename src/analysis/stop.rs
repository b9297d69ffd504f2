//! Stop word filtering.
//!
//! Removes common function words that carry little authorial signal. The
//! built-in English list is the SMART information-retrieval stop list:
//! pronouns, articles, auxiliaries, prepositions and conjunctions plus
//! frequent adverbs and discourse words such as "however" and "also".
//!
//! # Examples
//!
//! ```
//! use penmark::analysis::stop::StopFilter;
//! use penmark::analysis::token::Token;
//!
//! let filter = StopFilter::english();
//! let tokens = vec![
//!     Token::new("the", 0),
//!     Token::new("quick", 1),
//!     Token::new("brown", 2),
//! ];
//!
//! let result: Vec<_> = filter.filter(tokens).collect();
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "quick");
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::Token;
use crate::config::StopWords;

/// Default English stop words list (the SMART list).
pub const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "able", "about", "above", "according", "accordingly", "across", "actually", "after",
    "afterwards", "again", "against", "all", "allow", "allows", "almost", "alone", "along",
    "already", "also", "although", "always", "am", "among", "amongst", "an", "and", "another",
    "any", "anybody", "anyhow", "anyone", "anything", "anyway", "anyways", "anywhere", "apart",
    "appear", "appreciate", "appropriate", "are", "around", "as", "aside", "ask", "asking",
    "associated", "at", "available", "away", "awfully", "b", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "believe", "below",
    "beside", "besides", "best", "better", "between", "beyond", "both", "brief", "but", "by", "c",
    "came", "can", "cannot", "cant", "cause", "causes", "certain", "certainly", "changes",
    "clearly", "co", "com", "come", "comes", "concerning", "consequently", "consider",
    "considering", "contain", "containing", "contains", "corresponding", "could", "course",
    "currently", "d", "definitely", "described", "despite", "did", "different", "do", "does",
    "doing", "done", "down", "downwards", "during", "e", "each", "edu", "eg", "eight", "either",
    "else", "elsewhere", "enough", "entirely", "especially", "et", "etc", "even", "ever", "every",
    "everybody", "everyone", "everything", "everywhere", "ex", "exactly", "example", "except", "f",
    "far", "few", "fifth", "first", "five", "followed", "following", "follows", "for", "former",
    "formerly", "forth", "four", "from", "further", "furthermore", "g", "get", "gets", "getting",
    "given", "gives", "go", "goes", "going", "gone", "got", "gotten", "greetings", "h", "had",
    "happens", "hardly", "has", "have", "having", "he", "hello", "help", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "hi", "him", "himself", "his",
    "hither", "hopefully", "how", "howbeit", "however", "i", "ie", "if", "ignored", "immediate",
    "in", "inasmuch", "inc", "indeed", "indicate", "indicated", "indicates", "inner", "insofar",
    "instead", "into", "inward", "is", "it", "its", "itself", "j", "just", "k", "keep", "keeps",
    "kept", "know", "knows", "known", "l", "last", "lately", "later", "latter", "latterly",
    "least", "less", "lest", "let", "like", "liked", "likely", "little", "look", "looking",
    "looks", "ltd", "m", "mainly", "many", "may", "maybe", "me", "mean", "meanwhile", "merely",
    "might", "more", "moreover", "most", "mostly", "much", "must", "my", "myself", "n", "name",
    "namely", "nd", "near", "nearly", "necessary", "need", "needs", "neither", "never",
    "nevertheless", "new", "next", "nine", "no", "nobody", "non", "none", "noone", "nor",
    "normally", "not", "nothing", "novel", "now", "nowhere", "o", "obviously", "of", "off",
    "often", "oh", "ok", "okay", "old", "on", "once", "one", "ones", "only", "onto", "or", "other",
    "others", "otherwise", "ought", "our", "ours", "ourselves", "out", "outside", "over",
    "overall", "own", "p", "particular", "particularly", "per", "perhaps", "placed", "please",
    "plus", "possible", "presumably", "probably", "provides", "q", "que", "quite", "qv", "r",
    "rather", "rd", "re", "really", "reasonably", "regarding", "regardless", "regards",
    "relatively", "respectively", "right", "s", "said", "same", "saw", "say", "saying", "says",
    "second", "secondly", "see", "seeing", "seem", "seemed", "seeming", "seems", "seen", "self",
    "selves", "sensible", "sent", "serious", "seriously", "seven", "several", "shall", "she",
    "should", "since", "six", "so", "some", "somebody", "somehow", "someone", "something",
    "sometime", "sometimes", "somewhat", "somewhere", "soon", "sorry", "specified", "specify",
    "specifying", "still", "sub", "such", "sup", "sure", "t", "take", "taken", "tell", "tends",
    "th", "than", "thank", "thanks", "thanx", "that", "thats", "the", "their", "theirs", "them",
    "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore", "therein",
    "theres", "thereupon", "these", "they", "think", "third", "this", "thorough", "thoroughly",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "took", "toward", "towards", "tried", "tries", "truly", "try", "trying", "twice", "two", "u",
    "un", "under", "unfortunately", "unless", "unlikely", "until", "unto", "up", "upon", "us",
    "use", "used", "useful", "uses", "using", "usually", "uucp", "v", "value", "various", "very",
    "via", "viz", "vs", "w", "want", "wants", "was", "way", "we", "welcome", "well", "went",
    "were", "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
    "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who",
    "whoever", "whole", "whom", "whose", "why", "will", "willing", "wish", "with", "within",
    "without", "wonder", "would", "x", "y", "yes", "yet", "you", "your", "yours", "yourself",
    "yourselves", "z", "zero",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// A filter that removes stop words from a token sequence.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a stop filter with the built-in English list.
    pub fn english() -> Self {
        Self::with_stop_words(DEFAULT_ENGLISH_STOP_WORDS_SET.clone())
    }

    /// Create a stop filter that removes nothing.
    pub fn empty() -> Self {
        Self::with_stop_words(HashSet::new())
    }

    /// Create a stop filter with custom stop words.
    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
        }
    }

    /// Create a stop filter from a list of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(words.into_iter().map(Into::into).collect())
    }

    /// Build the filter described by a [`StopWords`] setting.
    ///
    /// Custom words are lowercased when `lowercase` is set so they compare
    /// against tokens after case folding.
    pub fn from_config(stop_words: &StopWords, lowercase: bool) -> Self {
        match stop_words {
            StopWords::English => Self::english(),
            StopWords::None => Self::empty(),
            StopWords::Custom(words) => Self::from_words(words.iter().map(|w| {
                if lowercase {
                    w.to_lowercase()
                } else {
                    w.clone()
                }
            })),
        }
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }

    /// Drop stop words from `tokens`, preserving the order of the rest.
    pub fn filter<I>(&self, tokens: I) -> impl Iterator<Item = Token>
    where
        I: IntoIterator<Item = Token>,
    {
        tokens
            .into_iter()
            .filter(move |token| !self.is_stop_word(&token.text))
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::from_words(vec!["the", "and", "or"]);
        let tokens = vec![
            Token::new("hello", 0),
            Token::new("the", 1),
            Token::new("world", 2),
            Token::new("and", 3),
            Token::new("test", 4),
        ];

        let result: Vec<Token> = filter.filter(tokens).collect();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "world");
        assert_eq!(result[1].position, 2);
        assert_eq!(result[2].text, "test");
    }

    #[test]
    fn test_english_defaults() {
        let filter = StopFilter::english();
        assert!(filter.is_stop_word("the"));
        assert!(filter.is_stop_word("which"));
        assert!(!filter.is_stop_word("apple"));
        assert!(!filter.is_stop_word("The"));
    }

    #[test]
    fn test_english_covers_discourse_words() {
        let filter = StopFilter::english();
        for word in [
            "also", "however", "yet", "us", "among", "whether", "within", "without",
        ] {
            assert!(filter.is_stop_word(word), "{word} should be stopped");
        }
        assert_eq!(filter.len(), DEFAULT_ENGLISH_STOP_WORDS.len());
        assert!(!filter.is_stop_word("whale"));
    }

    #[test]
    fn test_from_config_custom_lowercases() {
        let words = StopWords::Custom(vec!["Foo".to_string(), "BAR".to_string()]);

        let folded = StopFilter::from_config(&words, true);
        assert!(folded.is_stop_word("foo"));
        assert!(folded.is_stop_word("bar"));

        let verbatim = StopFilter::from_config(&words, false);
        assert!(verbatim.is_stop_word("Foo"));
        assert!(!verbatim.is_stop_word("foo"));
    }

    #[test]
    fn test_from_config_none() {
        let filter = StopFilter::from_config(&StopWords::None, true);
        assert!(filter.is_empty());
        assert!(!filter.is_stop_word("the"));
    }
}
