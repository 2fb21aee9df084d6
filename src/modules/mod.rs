pub mod cache;
pub mod dictionary;
pub mod error;
pub mod oracle;
pub mod phoneme;
pub mod rhyme;
pub mod script;
pub mod token;
pub mod transliterate;
pub mod unify;
