pub mod traits;
pub mod word_list;
