//! Library side of the `subreddit-feed` command-line front end.

pub mod commands;
pub mod logging;
pub mod render;
pub mod settings;
