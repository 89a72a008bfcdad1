pub mod common;
pub mod gap;
pub mod dos;
pub mod band;
pub mod kpath;
