//! # ミドルウェア
//!
//! Web サーバー用のミドルウェアを提供する。

mod cache_control;
mod session_gate;

pub use cache_control::no_cache;
pub use session_gate::session_gate;
