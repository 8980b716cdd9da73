use crate::context::StudentInformationContext;
use crate::errors::Result;
use tracing::{info, warn};

/// 各集合的行数统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionCounts {
    pub courses: u64,
    pub students: u64,
    pub enrollments: u64,
}

/// 统计上下文中各集合的行数
pub async fn collection_counts(context: &StudentInformationContext) -> Result<CollectionCounts> {
    Ok(CollectionCounts {
        courses: context.courses().count().await?,
        students: context.students().count().await?,
        enrollments: context.enrollments().count().await?,
    })
}

/// 准备数据库：建立连接、执行迁移并输出当前数据规模
pub async fn prepare_database() -> Result<CollectionCounts> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A rustls crypto provider was already installed, keeping it");
    }

    let context = StudentInformationContext::from_config().await?;
    warn!("Storage backend initialized and migrations completed");

    let counts = match collection_counts(&context).await {
        Ok(counts) => counts,
        Err(e) => {
            // 统计失败也要释放上下文
            if let Err(close_err) = context.dispose().await {
                warn!("Failed to dispose context: {}", close_err);
            }
            return Err(e);
        }
    };

    info!(
        "Database contains {} course(s), {} student(s), {} enrollment(s)",
        counts.courses, counts.students, counts.enrollments
    );

    context.dispose().await?;
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::models::courses::requests::CreateCourseRequest;

    #[tokio::test]
    async fn test_collection_counts() {
        let context = StudentInformationContext::new(DatabaseConfig::in_memory())
            .await
            .unwrap();
        context
            .courses()
            .add(CreateCourseRequest {
                title: "Algorithms".to_string(),
                credits: 3,
            })
            .await
            .unwrap();

        let counts = collection_counts(&context).await.unwrap();
        assert_eq!(
            counts,
            CollectionCounts {
                courses: 1,
                students: 0,
                enrollments: 0,
            }
        );
    }
}
