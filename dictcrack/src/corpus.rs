use memmap2::Mmap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::ops::Deref;
use std::path::Path;
use tracing::{debug, trace, warn};

use crate::errors::{CrackError, CrackResult};

const BUFFER_CAPACITY: usize = 65536;
pub(crate) const MMAP_THRESHOLD: u64 = 10 * 1024 * 1024; // 10MB

/// The ordered, immutable list of candidate passwords.
///
/// Duplicates are kept and order is preserved, since the sequential scanner's
/// "first match" is defined by corpus index. Once built, a corpus is only ever
/// shared by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    words: Vec<String>,
}

impl Corpus {
    /// Builds a corpus from in-memory lines, skipping blank ones
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = lines
            .into_iter()
            .map(Into::into)
            .filter(|line| !line.trim().is_empty())
            .collect();
        Self { words }
    }

    /// Loads a wordlist, one candidate per line.
    ///
    /// Trailing `\n` / `\r\n` terminators are stripped, lines that are blank
    /// after trimming are skipped and everything else is kept verbatim.
    /// Bytes that are not valid UTF-8 are replaced rather than rejected.
    pub fn load(path: impl AsRef<Path>) -> CrackResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CrackError::from_io(path, e))?;
        let size = file
            .metadata()
            .map_err(|e| CrackError::from_io(path, e))?
            .len();

        let corpus = if size >= MMAP_THRESHOLD {
            trace!("Memory mapping wordlist: {} ({} bytes)", path.display(), size);
            let mmap = unsafe { Mmap::map(&file) }.map_err(CrackError::IoError)?;
            Self::from_bytes(&mmap, path)
        } else {
            trace!("Reading wordlist into memory: {} ({} bytes)", path.display(), size);
            let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
            let mut bytes = Vec::with_capacity(size as usize);
            reader
                .read_to_end(&mut bytes)
                .map_err(CrackError::IoError)?;
            Self::from_bytes(&bytes, path)
        };

        debug!(
            "Loaded {} candidates from {}",
            corpus.len(),
            path.display()
        );
        Ok(corpus)
    }

    /// Like [`Corpus::load`], but an empty result is an error
    pub fn load_non_empty(path: impl AsRef<Path>) -> CrackResult<Self> {
        let corpus = Self::load(path)?;
        if corpus.is_empty() {
            return Err(CrackError::EmptyCorpus);
        }
        Ok(corpus)
    }

    fn from_bytes(bytes: &[u8], path: &Path) -> Self {
        let mut words = Vec::new();
        let mut lossy_lines = 0usize;

        for raw in bytes.split(|&b| b == b'\n') {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            let line = match std::str::from_utf8(raw) {
                Ok(valid) => valid.to_owned(),
                Err(_) => {
                    lossy_lines += 1;
                    String::from_utf8_lossy(raw).into_owned()
                }
            };
            if !line.trim().is_empty() {
                words.push(line);
            }
        }

        if lossy_lines > 0 {
            warn!(
                "Replaced invalid UTF-8 in {} lines of {}",
                lossy_lines,
                path.display()
            );
        }

        Self { words }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.words.iter().any(|w| w == candidate)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.words
    }
}

impl Deref for Corpus {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

impl From<Vec<String>> for Corpus {
    fn from(words: Vec<String>) -> Self {
        Self::from_lines(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_from_lines_skips_blank() {
        let corpus = Corpus::from_lines(["apple", "", "  ", "banana", "\t", "cherry"]);
        assert_eq!(corpus.words(), &["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_load_strips_terminators_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "apple\r\n banana \n\n\r\ncherry").unwrap();

        let corpus = Corpus::load(&path).unwrap();
        assert_eq!(corpus.words(), &["apple", " banana ", "cherry"]);
    }

    #[test]
    fn test_load_keeps_duplicates_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "b\na\nb\n").unwrap();

        let corpus = Corpus::load(&path).unwrap();
        assert_eq!(corpus.words(), &["b", "a", "b"]);
        assert!(corpus.contains("a"));
        assert!(!corpus.contains("c"));
    }

    #[test]
    fn test_load_invalid_utf8_is_lossy() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"caf\xe9\nok\n").unwrap();

        let corpus = Corpus::load(&path).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[0], "caf\u{FFFD}");
        assert_eq!(corpus[1], "ok");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Corpus::load("definitely/not/here.txt");
        assert!(matches!(result, Err(CrackError::FileNotFound(_))));
    }

    #[test]
    fn test_load_non_empty_rejects_blank_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        fs::write(&path, "\n\n   \n").unwrap();

        assert!(Corpus::load(&path).unwrap().is_empty());
        assert!(matches!(
            Corpus::load_non_empty(&path),
            Err(CrackError::EmptyCorpus)
        ));
    }
}
