use crate::models::common::PaginationQuery;
use serde::Deserialize;

// 创建学生请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStudentRequest {
    pub last_name: String,
    pub first_mid_name: String,
    pub enrollment_date: chrono::DateTime<chrono::Utc>,
}

// 更新学生请求，未设置的字段保持不变
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStudentRequest {
    pub last_name: Option<String>,
    pub first_mid_name: Option<String>,
    pub enrollment_date: Option<chrono::DateTime<chrono::Utc>>,
}

// 学生列表查询参数，search 同时匹配姓和名
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}
