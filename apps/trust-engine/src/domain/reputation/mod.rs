pub mod badge;
pub mod weights;
