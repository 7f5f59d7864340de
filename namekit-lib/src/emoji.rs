//! Recognized emoji clusters.
//!
//! The set is append-only: the oracle owner extends it in batches and
//! nothing ever removes an entry.

use std::collections::HashSet;

/// Clusters recognized by a freshly deployed oracle.
pub const DEFAULT_EMOJIS: &[&str] = &[
    "🐻", "🪪", "🐻‍❄️", "🍯", "🐝", "🌿", "🔥", "🚀", "🌙", "⭐", "✨", "💎", "🎉", "🎯", "🧸",
    "🦄", "🐸", "🐶", "🐱", "🦊", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐵", "🐧", "🐦", "🦉",
    "🐙", "🦀", "🐳", "🌈", "🌊", "🍀", "🍕", "🍔", "🍩", "🍪", "☕", "🍺", "⚡", "❤️", "💜",
    "💙", "💚", "🖤", "🤍", "😀", "😄", "😂", "🤪", "😎", "🥳", "🤖", "👾", "👻", "💀", "👑",
    "🫶", "👀", "🙏", "💪", "🤝", "⛓️", "🔑", "🗝️", "🏆", "🎮", "🧠", "🪙", "💰", "📈",
];

/// Set of recognized emoji clusters.
#[derive(Clone, Debug, Default)]
pub struct EmojiSet {
    clusters: HashSet<String>,
    longest_chars: usize,
}

impl EmojiSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set seeded with [`DEFAULT_EMOJIS`].
    pub fn with_defaults() -> Self {
        let mut set = Self::new();
        set.insert_batch(DEFAULT_EMOJIS.iter().copied());
        set
    }

    /// Adds clusters, returning how many were new.
    ///
    /// Empty strings are skipped. Re-adding a known cluster is a no-op.
    pub fn insert_batch<I, S>(&mut self, batch: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for cluster in batch {
            let cluster = cluster.as_ref();
            if cluster.is_empty() {
                continue;
            }
            if self.clusters.insert(cluster.to_string()) {
                self.longest_chars = self.longest_chars.max(cluster.chars().count());
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, unit: &str) -> bool {
        self.clusters.contains(unit)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Splits `text` into character units.
    ///
    /// At each position the longest known cluster wins; anything else
    /// becomes a single-`char` unit, so unknown input still segments and is
    /// rejected later by character validation.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut units = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let max = self.longest_chars.min(chars.len() - i);
            let mut taken = 1;
            for width in (2..=max).rev() {
                let candidate: String = chars[i..i + width].iter().collect();
                if self.clusters.contains(&candidate) {
                    taken = width;
                    break;
                }
            }
            units.push(chars[i..i + taken].iter().collect());
            i += taken;
        }
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_contain_seed() {
        let set = EmojiSet::with_defaults();
        assert!(set.contains("🐻"));
        assert!(set.contains("🪪"));
        assert!(!set.contains("a"));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = EmojiSet::new();
        assert_eq!(set.insert_batch(["🫶", "🦶"]), 2);
        assert_eq!(set.insert_batch(["🫶", ""]), 0);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_segment_prefers_longest_cluster() {
        let set = EmojiSet::with_defaults();
        // polar bear is bear + ZWJ + snowflake; it must stay one unit
        let units = set.segment("🐻‍❄️ooga");
        assert_eq!(units, vec!["🐻‍❄️", "o", "o", "g", "a"]);

        let units = set.segment("a🐻b");
        assert_eq!(units, vec!["a", "🐻", "b"]);
    }

    #[test]
    fn test_segment_unknown_falls_back_to_chars() {
        let set = EmojiSet::new();
        assert_eq!(set.segment("ab"), vec!["a", "b"]);
        assert!(set.segment("").is_empty());
    }
}
