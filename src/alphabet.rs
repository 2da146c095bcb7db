use {
    serde::Deserialize,
    std::{error, fmt, str::FromStr, sync::Arc},
};

/// Maps input symbols onto the dense slot indexes of a trie node.
pub trait Alphabet: 'static + Send + Sync {
    /// Number of slots in every node of a tree using this alphabet.
    fn size(&self) -> usize;

    /// Returns the slot of `symbol`, or `None` if the symbol is not part of the alphabet.
    fn position(&self, symbol: u8) -> Option<usize>;

    fn name(&self) -> &'static str;
}

/// Digits `0-9` followed by the lowercase letters `a-f`.
///
/// Uppercase hex letters are not part of this alphabet.
pub struct Hexadecimal;

impl Alphabet for Hexadecimal {
    fn size(&self) -> usize {
        16
    }

    fn position(&self, symbol: u8) -> Option<usize> {
        match symbol {
            b'0'..=b'9' => Some((symbol - b'0') as usize),
            b'a'..=b'f' => Some((symbol - b'a') as usize + 10),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        "hexadecimal"
    }
}

pub struct Decimal;

impl Alphabet for Decimal {
    fn size(&self) -> usize {
        10
    }

    fn position(&self, symbol: u8) -> Option<usize> {
        match symbol {
            b'0'..=b'9' => Some((symbol - b'0') as usize),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        "decimal"
    }
}

/// English letters, folding `A-Z` onto the same slots as `a-z`.
pub struct EnglishAlpha;

impl Alphabet for EnglishAlpha {
    fn size(&self) -> usize {
        26
    }

    fn position(&self, symbol: u8) -> Option<usize> {
        match symbol {
            b'a'..=b'z' => Some((symbol - b'a') as usize),
            b'A'..=b'Z' => Some((symbol - b'A') as usize),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        "english_alpha"
    }
}

lazy_static! {
    pub static ref HEXADECIMAL: Arc<dyn Alphabet> = Arc::new(Hexadecimal);
    pub static ref DECIMAL: Arc<dyn Alphabet> = Arc::new(Decimal);
    pub static ref ENGLISH_ALPHA: Arc<dyn Alphabet> = Arc::new(EnglishAlpha);
}

/// Returns the index of the first symbol in `key` which `alphabet` does not recognize.
pub fn validate(alphabet: &dyn Alphabet, key: &[u8]) -> Option<usize> {
    key.iter().position(|&symbol| match alphabet.position(symbol) {
        Some(pos) => pos >= alphabet.size(),
        None => true,
    })
}

/// Names one of the built-in alphabets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphabetKind {
    #[serde(alias = "hex")]
    Hexadecimal,
    #[serde(alias = "dec")]
    Decimal,
    #[serde(alias = "english", alias = "alpha")]
    EnglishAlpha,
}

impl AlphabetKind {
    pub fn alphabet(self) -> Arc<dyn Alphabet> {
        match self {
            AlphabetKind::Hexadecimal => HEXADECIMAL.clone(),
            AlphabetKind::Decimal => DECIMAL.clone(),
            AlphabetKind::EnglishAlpha => ENGLISH_ALPHA.clone(),
        }
    }
}

impl Default for AlphabetKind {
    fn default() -> Self {
        AlphabetKind::Hexadecimal
    }
}

impl FromStr for AlphabetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.trim().to_lowercase()[..] {
            "hexadecimal" | "hex" => Ok(AlphabetKind::Hexadecimal),
            "decimal" | "dec" => Ok(AlphabetKind::Decimal),
            "english" | "english_alpha" | "alpha" => Ok(AlphabetKind::EnglishAlpha),
            _ => Err(Error::UnknownAlphabet(s.to_string())),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Error {
    UnknownAlphabet(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnknownAlphabet(ref name) => write!(f, "Unknown alphabet '{}'", name),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
