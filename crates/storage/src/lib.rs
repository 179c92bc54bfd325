#![forbid(unsafe_code)]

pub mod repository;
pub mod sample;
pub mod sources;

pub use repository::{
    BankLocation, InMemoryRepository, QuestionBankRepository, Storage, StorageError,
    ValidatedBank, load_validated,
};
