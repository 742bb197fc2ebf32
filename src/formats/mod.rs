//! Dialect implementations
//!
//! One module per dialect. Most dialects lean on the shared comrak
//! bridge in [`markdown`] and differ only in pre/post rewrite passes;
//! [`slack`] carries its own hand-rolled mrkdwn parser and serializer.

pub mod ai_chat;
pub mod discord;
pub mod gdocs;
pub mod gfm;
pub mod gitbook;
pub mod joplin;
pub mod linear;
pub mod markdown;
pub mod mattermost;
pub mod notion;
pub mod obsidian;
pub(crate) mod passes;
pub mod reddit;
pub mod slack;
pub mod trello;
