pub mod patcher;
pub mod patches;
