//! 业务数据模型
//!
//! 与 `entity` 模块中的表结构分离，供上下文与调用方使用。

pub mod common;
pub mod courses;
pub mod enrollments;
pub mod students;

pub use common::{PaginationInfo, PaginationQuery};
