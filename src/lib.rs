//! MTM Core Library
//!
//! This library provides the core components for the MoreThanMoney affiliate
//! commission and trading-signal feed platform.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
