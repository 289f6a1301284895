pub mod interface;
pub mod mac;
pub mod neighbor;
pub mod subnet;
