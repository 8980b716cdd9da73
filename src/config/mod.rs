//! 配置管理
//!
//! 配置来源（优先级由低到高）：内置默认值、`config.toml`、`config.{APP_ENV}.toml`、
//! `STUDENT_INFO_*` 环境变量以及少量约定俗成的环境变量。

mod r#impl;
mod structs;

pub use structs::*;
