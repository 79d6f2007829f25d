//! Dictionary index: words grouped by length.
//!
//! Words are uppercased, de-duplicated and grouped. A group is kept only when
//! it holds at least twice as many words as a session places, so the draw
//! loop can afford to throw words away when they don't fit.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::rng::RandomSource;

#[derive(Debug, Clone)]
pub struct Dictionary {
    groups: BTreeMap<usize, Vec<String>>,
    word_count: usize,
}

impl Dictionary {
    /// Smallest group that can supply `word_count` placements.
    pub fn min_group_size(word_count: usize) -> usize {
        2 * word_count
    }

    /// Builds the index from raw tokens.
    ///
    /// Empty tokens and tokens with non-ASCII bytes are skipped.
    pub fn build<I, S>(words: I, word_count: usize) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sets: BTreeMap<usize, BTreeSet<String>> = BTreeMap::new();
        for word in words {
            let word = word.as_ref().trim();
            if word.is_empty() || !word.is_ascii() {
                continue;
            }
            let word = word.to_ascii_uppercase();
            sets.entry(word.len()).or_default().insert(word);
        }

        if sets.is_empty() {
            return Err(Error::EmptyDictionary);
        }

        let required = Self::min_group_size(word_count);
        let groups: BTreeMap<usize, Vec<String>> = sets
            .into_iter()
            .filter(|(len, set)| {
                let keep = set.len() >= required;
                if !keep {
                    debug!(length = len, words = set.len(), required, "dropping length group");
                }
                keep
            })
            .map(|(len, set)| (len, set.into_iter().collect()))
            .collect();

        if groups.is_empty() {
            return Err(Error::NoUsableLengthGroup { required });
        }

        Ok(Self { groups, word_count })
    }

    /// Reads a whitespace-separated word list from disk.
    pub fn from_path(path: impl AsRef<Path>, word_count: usize) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::DictionaryUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        let dictionary = Self::build(text.split_whitespace(), word_count)?;
        debug!(
            path = %path.display(),
            groups = dictionary.groups.len(),
            "dictionary loaded"
        );
        Ok(dictionary)
    }

    /// The word count the groups were filtered for.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Word lengths of the retained groups, ascending.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups.keys().copied()
    }

    pub fn group(&self, len: usize) -> Option<&[String]> {
        self.groups.get(&len).map(Vec::as_slice)
    }

    /// Uniformly picks one retained group whose words are at most `max_len`
    /// long.
    pub fn choose_group<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        max_len: usize,
    ) -> Result<(usize, &[String])> {
        let candidates: Vec<usize> = self.lengths().filter(|&len| len <= max_len).collect();
        if candidates.is_empty() {
            return Err(Error::NoUsableLengthGroup {
                required: Self::min_group_size(self.word_count),
            });
        }
        let len = candidates[rng.below(candidates.len())];
        Ok((len, self.groups[&len].as_slice()))
    }
}
