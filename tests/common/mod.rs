#![allow(dead_code)]

pub mod builders;
pub mod fault_stores;
pub mod strategies;
pub mod test_db;

pub use builders::*;
pub use fault_stores::*;
pub use test_db::*;
