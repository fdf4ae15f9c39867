//! Core business logic for Rollcall.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! The attendance ledger, its balance rule and its storage contract live here.
//!
//! # Modules
//!
//! - `attendance` - Attendance entries, leave balance, services and query shaping

pub mod attendance;
