//! Student Information - 学生信息数据模型
//!
//! 课程、学生与选课三类实体，通过 SeaORM 持久化。
//!
//! # 架构
//! - `config`: 配置管理
//! - `context`: 持久化上下文与实体集合
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 业务数据模型
//! - `runtime`: 运行时生命周期管理
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod context;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod storage;
pub mod utils;

pub use context::StudentInformationContext;
