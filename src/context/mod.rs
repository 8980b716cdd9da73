//! 持久化上下文
//!
//! 对外暴露三个实体集合（课程、选课、学生）。SQL 生成、外键约束和事务由 SeaORM
//! 与数据库负责，上下文只负责构造、集合访问与释放。
//!
//! 上下文按"一次工作单元一个实例"使用：构造、操作、`dispose`。
//! 忘记调用 `dispose` 时连接池在析构时同样会释放连接。

mod sets;

pub use sets::{CourseSet, EnrollmentSet, StudentSet};

use std::sync::Arc;

use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::Result;
use crate::storage::{Storage, create_storage};

pub struct StudentInformationContext {
    storage: Arc<dyn Storage>,
    // 仅由本上下文打开的存储在 dispose 时关闭
    owns_storage: bool,
}

impl StudentInformationContext {
    /// 使用给定的数据库选项构造上下文（连接并执行迁移）
    pub async fn new(options: DatabaseConfig) -> Result<Self> {
        let storage = create_storage(&options).await?;
        debug!("Student information context opened");
        Ok(Self {
            storage,
            owns_storage: true,
        })
    }

    /// 使用全局配置中的数据库选项构造上下文
    pub async fn from_config() -> Result<Self> {
        Self::new(AppConfig::get().database.clone()).await
    }

    /// 包装已有的存储后端
    ///
    /// 存储由调用方管理，`dispose` 不会关闭它，多个上下文可共享同一连接池。
    pub fn from_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            owns_storage: false,
        }
    }

    /// 课程集合
    pub fn courses(&self) -> CourseSet<'_> {
        CourseSet::new(self.storage.as_ref())
    }

    /// 选课集合
    pub fn enrollments(&self) -> EnrollmentSet<'_> {
        EnrollmentSet::new(self.storage.as_ref())
    }

    /// 学生集合
    pub fn students(&self) -> StudentSet<'_> {
        StudentSet::new(self.storage.as_ref())
    }

    /// 释放上下文，自行打开的连接池随之关闭
    pub async fn dispose(self) -> Result<()> {
        if self.owns_storage {
            self.storage.close().await?;
        }
        debug!("Student information context disposed");
        Ok(())
    }

    /// 在一个工作单元内使用上下文
    ///
    /// 无论 `work` 成功与否，上下文都会被释放；`work` 的错误优先返回。
    pub async fn scope<T, F>(options: DatabaseConfig, work: F) -> Result<T>
    where
        F: for<'a> FnOnce(&'a StudentInformationContext) -> BoxFuture<'a, Result<T>>,
    {
        let context = Self::new(options).await?;
        context.run(work).await
    }

    async fn run<T, F>(self, work: F) -> Result<T>
    where
        F: for<'a> FnOnce(&'a StudentInformationContext) -> BoxFuture<'a, Result<T>>,
    {
        let outcome = work(&self).await;
        let disposed = self.dispose().await;

        match (outcome, disposed) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), disposed) => {
                if let Err(close_err) = disposed {
                    warn!("Failed to dispose context after error: {}", close_err);
                }
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests;
