pub mod logging;
pub mod randomness;
