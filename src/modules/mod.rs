//! Feature modules with their own decision logic

pub mod import;
pub mod maintenance;
