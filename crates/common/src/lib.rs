#![forbid(unsafe_code)]

mod error;

pub use error::*;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Intervalo padrão do sweep de expiração, em segundos. 0 = desligado.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 0;
pub const MAX_BODY_SIZE: usize = 2 * 1024 * 1024; // 2 MB
