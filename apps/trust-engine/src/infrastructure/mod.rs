pub mod audit;
pub mod matching;
pub mod security;
