pub mod entity;
pub mod events;
pub mod vote;
