//! 工具模块 - 通用工具函数和类型
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`AppJson`] / [`AppPath`] / [`AppQuery`] - 提取器，拒绝时返回统一错误体
//! - 日志、输入校验

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{ApiResponse, AppError, AppJson, AppPath, AppQuery, AppResult, ErrorCategory, ErrorCode};
