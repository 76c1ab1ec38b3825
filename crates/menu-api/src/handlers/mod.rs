//! HTTP handlers

pub mod account;
pub mod auth;
pub mod health;
pub mod menus;
pub mod multipart;
pub mod pages;
pub mod wizard;
