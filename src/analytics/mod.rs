use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::error::{ArchiveError, Result};

/// Token → number of times it occurs in the source text.
pub type WordFrequencyTable = BTreeMap<String, usize>;

/// Single-character tokens that are real words.
const SINGLE_LETTER_WORDS: &[&str] = &["a", "i"];

#[derive(Debug, Clone, Serialize)]
pub struct FrequencyReport {
    pub source: String,
    pub title: String,
    pub top: Vec<(String, usize)>,
}

/// Whitespace split, dropping stray single characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|t| t.chars().count() > 1 || SINGLE_LETTER_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Count each token as a substring of `text`.
///
/// Matches are not word-bounded: "ard" is found once in "aardvark".
pub fn count_occurrences<'t>(
    text: &str,
    tokens: impl IntoIterator<Item = &'t String>,
) -> WordFrequencyTable {
    tokens
        .into_iter()
        .map(|t| (t.clone(), text.matches(t.as_str()).count()))
        .collect()
}

pub fn filter_to_known_words(
    table: &WordFrequencyTable,
    dictionary: &HashSet<String>,
) -> WordFrequencyTable {
    table
        .iter()
        .filter(|(word, _)| dictionary.contains(*word))
        .map(|(w, c)| (w.clone(), *c))
        .collect()
}

/// The `n` most frequent words, returned least frequent first so a chart
/// drawn top-down puts the biggest bar last.
pub fn top_n(table: &WordFrequencyTable, n: usize) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> =
        table.iter().map(|(w, c)| (w.clone(), *c)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries.truncate(n);
    entries.reverse();
    entries
}

/// Tokenize, count and keep only dictionary words.
pub fn word_frequencies(text: &str, dictionary: &HashSet<String>) -> WordFrequencyTable {
    let unique: HashSet<String> = tokenize(text).into_iter().collect();
    filter_to_known_words(&count_occurrences(text, &unique), dictionary)
}

/// Read a whitespace-separated word list.
pub fn load_word_list(path: &Path) -> Result<HashSet<String>> {
    if !path.exists() {
        return Err(ArchiveError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(content.split_whitespace().map(str::to_string).collect())
}

/// Top-`n` known words of a transcript file, with a chart title.
pub fn analyze_file(path: &Path, dictionary: &HashSet<String>, n: usize) -> Result<FrequencyReport> {
    if !path.exists() {
        return Err(ArchiveError::FileNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("transcript");

    Ok(FrequencyReport {
        source: path.display().to_string(),
        title: format!("{n} Most Spoken Words in \"{stem}\""),
        top: top_n(&word_frequencies(&text, dictionary), n),
    })
}
