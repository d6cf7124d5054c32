pub mod config;
pub mod exit_code;
pub mod paths;
pub mod xdg;
