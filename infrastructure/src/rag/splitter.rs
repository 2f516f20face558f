//! Splitting regulation text into overlapping chunks

use text_splitter::ChunkConfig;

/// Splits text into chunks of at most `chunk_size` characters
///
/// Cuts fall on the coarsest semantic boundary that fits (paragraphs, lines,
/// sentences, words, then characters), and consecutive chunks share up to
/// `chunk_overlap` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextSplitter {
    fn default() -> Self {
        Self::new(1000, 150)
    }
}

impl TextSplitter {
    /// `chunk_size` is raised to 1 and `chunk_overlap` capped below it
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    pub fn split(&self, text: &str) -> Vec<String> {
        let config = ChunkConfig::new(self.chunk_size)
            .with_overlap(self.chunk_overlap)
            .unwrap_or_else(|_| ChunkConfig::new(self.chunk_size));
        text_splitter::TextSplitter::new(config)
            .chunks(text)
            .filter(|chunk| !chunk.trim().is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n)
            .map(|i| format!("w{i:02}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let splitter = TextSplitter::new(100, 10);
        assert_eq!(splitter.split("  A short rule.  "), vec!["A short rule."]);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        assert!(TextSplitter::default().split("").is_empty());
        assert!(TextSplitter::default().split(" \n\n ").is_empty());
    }

    #[test]
    fn test_chunks_respect_size() {
        let splitter = TextSplitter::new(20, 8);
        let chunks = splitter.split(&words(40));
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 20, "{chunk:?}");
        }
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let splitter = TextSplitter::new(20, 8);
        let chunks = splitter.split(&words(40));
        assert!(chunks[0].starts_with("w00"));

        for pair in chunks.windows(2) {
            let first_word = pair[1].split(' ').next().unwrap();
            assert!(pair[0].contains(first_word), "{pair:?}");
        }
        assert!(chunks.last().unwrap().ends_with("w39"));
    }

    #[test]
    fn test_no_overlap_covers_every_word_once() {
        let splitter = TextSplitter::new(20, 0);
        let chunks = splitter.split(&words(40));
        let rejoined: Vec<&str> = chunks.iter().flat_map(|c| c.split(' ')).collect();
        assert_eq!(rejoined.len(), 40);
    }

    #[test]
    fn test_prefers_paragraph_boundaries() {
        let splitter = TextSplitter::new(30, 0);
        let text = "Rule one applies here.\n\nRule two applies too.";
        assert_eq!(
            splitter.split(text),
            vec!["Rule one applies here.", "Rule two applies too."]
        );
    }

    #[test]
    fn test_long_word_is_split_by_characters() {
        let splitter = TextSplitter::new(4, 0);
        let chunks = splitter.split("abcdefghij");
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_multibyte_text() {
        let splitter = TextSplitter::new(3, 1);
        for chunk in splitter.split("ابجدهوز") {
            assert!(chunk.chars().count() <= 3);
        }
    }

    #[test]
    fn test_overlap_is_capped() {
        let splitter = TextSplitter::new(10, 50);
        assert_eq!(splitter.chunk_overlap(), 9);
        assert_eq!(TextSplitter::new(0, 0).chunk_size(), 1);
    }
}
