pub mod block;
pub mod history;
pub mod role;
pub mod stats;
