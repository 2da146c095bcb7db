#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub use {
    alphabet::{
        Alphabet, AlphabetKind, Decimal, EnglishAlpha, Hexadecimal, DECIMAL, ENGLISH_ALPHA,
        HEXADECIMAL,
    },
    configuration::{Configuration, ConfigurationError},
    trie::{Insertion, Trie},
};

pub mod alphabet;
pub mod configuration;
mod trie;
