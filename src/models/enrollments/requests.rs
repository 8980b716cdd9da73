use super::entities::Grade;
use crate::models::common::PaginationQuery;
use serde::Deserialize;
use uuid::Uuid;

// 创建选课请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEnrollmentRequest {
    pub course_id: Uuid,
    pub student_id: Uuid,
    pub grade: Option<Grade>,
}

// 更新选课请求，未设置的字段保持不变；清除成绩使用 set_grade
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEnrollmentRequest {
    pub course_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub grade: Option<Grade>,
}

// 选课列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnrollmentListQuery {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub course_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub grade: Option<Grade>,
}
