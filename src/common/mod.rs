pub mod fsutil;
pub mod paths;
