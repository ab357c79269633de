pub mod dto;
pub mod quality;
pub mod use_case;
