// src/lib.rs

//! Movie Cast API Library

pub mod error;
pub mod handler;
pub mod models;
pub mod query;
pub mod storage;
