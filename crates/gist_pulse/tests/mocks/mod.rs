#![allow(dead_code)]

pub mod audio_handler;
pub mod summarizer;
pub mod transcriber;
pub mod web_loader;
