// ABOUTME: Library exports for github-issues modules for testing and external use
// ABOUTME: Makes the editor bridge, dispatcher and config available to integration tests

pub mod args;
pub mod cli;
pub mod cli_output;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod editor;
pub mod issue_text;
pub mod output;
