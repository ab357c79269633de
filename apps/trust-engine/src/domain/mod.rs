pub mod content;
pub mod moderation;
pub mod report;
pub mod reputation;
pub mod shared;
pub mod user;
