pub mod content_analyzer;
