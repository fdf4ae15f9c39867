//! `SeaORM` entities for the attendance schema.

pub mod employees;
pub mod entries;
