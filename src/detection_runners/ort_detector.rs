mod ort_engine;
mod session_pool;

pub use ort_engine::*;
