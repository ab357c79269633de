pub mod log;
pub mod verdict;
