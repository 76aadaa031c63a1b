#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![allow(async_fn_in_trait)]

mod client;
mod controller;
mod cookie;
mod message;
mod notice;
mod premium;
mod view;

pub mod field;

pub use client::{Backend, HttpBackend};
pub use controller::MessageForm;
pub use cookie::get_cookie;
pub use message::{MessageContent, MessageSubmission, MessageType, PremiumRequest};
pub use notice::SuccessNotice;
pub use premium::PremiumForm;
pub use view::{FormView, MemoryView, Section};
