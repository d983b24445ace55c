//! 레이트 리밋 도메인 모델

pub mod decision;
pub mod rate_window;
pub mod user_tier;

pub use decision::*;
pub use rate_window::*;
pub use user_tier::*;
