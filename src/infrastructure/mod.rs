pub mod logging;
pub mod preferences;
pub mod storage;
