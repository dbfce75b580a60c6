pub mod batch;
pub mod confusables;
pub mod dates;
pub mod document_parser;
pub mod errors;
pub mod field_extractor;
pub mod lexicon;
pub mod models;
pub mod ner;
pub mod patterns;
pub mod pdf;
pub mod processor;
pub mod scoring;
pub mod settings_store;
pub mod text;
pub mod validators;
