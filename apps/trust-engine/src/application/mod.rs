pub mod moderation;
pub mod policy;
pub mod reports;
pub mod reputation;
pub mod suspension;
