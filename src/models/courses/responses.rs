use super::entities::Course;
use crate::models::{common::PaginationInfo, enrollments::entities::Enrollment};
use serde::Serialize;

// 课程列表响应
#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Course>,
}

// 课程及其选课记录
#[derive(Debug, Serialize)]
pub struct CourseWithEnrollments {
    pub course: Course,
    pub enrollments: Vec<Enrollment>,
}
