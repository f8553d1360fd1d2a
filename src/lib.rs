#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;

pub mod api;
pub mod controller;
pub mod fix;
mod logs;
pub mod notice;
pub mod platform;
pub mod request;
pub mod view;
