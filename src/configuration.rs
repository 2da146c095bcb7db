use {
    crate::{alphabet::AlphabetKind, trie::Insertion},
    serde::Deserialize,
    std::{error, fmt},
};

/// Describes how to build a `Trie`, parsed from an in-memory YAML document such as:
///
/// ```yaml
/// alphabet: english_alpha
/// insertion: strict
/// ```
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    pub alphabet: AlphabetKind,
    pub insertion: Insertion,
}

pub fn from_str(conf_str: &str) -> Result<Configuration, ConfigurationError> {
    let configuration: Configuration = serde_yaml::from_str(conf_str)?;
    debug!("Parsed configuration {:?}", configuration);
    Ok(configuration)
}

#[derive(Debug)]
pub enum ConfigurationError {
    DeserializationErr(serde_yaml::Error),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigurationError::DeserializationErr(ref err) => {
                write!(f, "Failed to parse configuration: {}", err)
            }
        }
    }
}

impl error::Error for ConfigurationError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            ConfigurationError::DeserializationErr(ref err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for ConfigurationError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigurationError::DeserializationErr(err)
    }
}
