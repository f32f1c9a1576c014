use md5::Md5;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::str::FromStr;

use crate::errors::CrackError;

/// A pure, deterministic mapping from a candidate to its lower-case hex digest.
///
/// Implementations must be safe to call from many workers at once without
/// coordination, hence the `Sync` bound. Any `Fn(&str) -> String + Sync`
/// closure is a `Digester`, which lets tests inject degenerate digests.
pub trait Digester: Sync {
    fn digest(&self, candidate: &str) -> String;
}

impl<F> Digester for F
where
    F: Fn(&str) -> String + Sync,
{
    fn digest(&self, candidate: &str) -> String {
        self(candidate)
    }
}

/// The hash algorithms exercised by the benchmark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    #[serde(rename = "MD5", alias = "md5")]
    Md5,
    #[serde(rename = "SHA-1", alias = "sha1", alias = "SHA1")]
    Sha1,
    #[serde(rename = "SHA-256", alias = "sha256", alias = "SHA256")]
    Sha256,
    #[serde(rename = "SHA-512", alias = "sha512", alias = "SHA512")]
    Sha512,
}

impl DigestAlgorithm {
    /// Benchmark order
    pub const ALL: [DigestAlgorithm; 4] = [
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha512,
        DigestAlgorithm::Md5,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA-1",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Width of the hex-encoded digest in characters
    pub fn digest_len(&self) -> usize {
        match self {
            DigestAlgorithm::Md5 => 32,
            DigestAlgorithm::Sha1 => 40,
            DigestAlgorithm::Sha256 => 64,
            DigestAlgorithm::Sha512 => 128,
        }
    }

    /// Hashes raw bytes and hex-encodes the result
    pub fn digest_bytes(&self, input: &[u8]) -> String {
        match self {
            DigestAlgorithm::Md5 => hex::encode(Md5::digest(input)),
            DigestAlgorithm::Sha1 => hex::encode(Sha1::digest(input)),
            DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(input)),
            DigestAlgorithm::Sha512 => hex::encode(Sha512::digest(input)),
        }
    }
}

impl Digester for DigestAlgorithm {
    fn digest(&self, candidate: &str) -> String {
        self.digest_bytes(candidate.as_bytes())
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = CrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "md5" => Ok(DigestAlgorithm::Md5),
            "sha1" => Ok(DigestAlgorithm::Sha1),
            "sha256" => Ok(DigestAlgorithm::Sha256),
            "sha512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(CrackError::unknown_algorithm(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            DigestAlgorithm::Md5.digest("password"),
            "5f4dcc3b5aa765d61d8327deb882cf99"
        );
        assert_eq!(
            DigestAlgorithm::Sha1.digest("password"),
            "5baa61e4c9b93f3f0682250b6cf8331b7ee68fd8"
        );
        assert_eq!(
            DigestAlgorithm::Sha256.digest("password"),
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
        assert_eq!(
            DigestAlgorithm::Sha256.digest(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_digest_widths() {
        for algorithm in DigestAlgorithm::ALL {
            let hex = algorithm.digest("banana");
            assert_eq!(hex.len(), algorithm.digest_len(), "{}", algorithm);
            assert!(hex
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("SHA-1".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha1);
        assert_eq!("sha256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert_eq!("Sha_512".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha512);
        assert_eq!("md5".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Md5);
        assert!(matches!(
            "crc32".parse::<DigestAlgorithm>(),
            Err(CrackError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for algorithm in DigestAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<DigestAlgorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_closure_digester() {
        let reverse = |s: &str| s.chars().rev().collect::<String>();
        assert_eq!(reverse.digest("abc"), "cba");
    }
}
