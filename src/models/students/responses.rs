use super::entities::Student;
use crate::models::{common::PaginationInfo, enrollments::entities::Enrollment};
use serde::Serialize;

// 学生列表响应
#[derive(Debug, Serialize)]
pub struct StudentListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Student>,
}

// 学生及其选课记录
#[derive(Debug, Serialize)]
pub struct StudentWithEnrollments {
    pub student: Student,
    pub enrollments: Vec<Enrollment>,
}
