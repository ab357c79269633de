pub mod content;
pub mod health;
pub mod moderation;
pub mod reports;
pub mod reputation;
pub mod suspensions;
