use std::sync::Arc;

use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::models::{
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::{CourseListResponse, CourseWithEnrollments},
    },
    enrollments::{
        entities::{Enrollment, Grade},
        requests::{CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest},
        responses::EnrollmentListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::{StudentListResponse, StudentWithEnrollments},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程
    async fn get_course_by_id(&self, id: Uuid) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程
    async fn update_course(&self, id: Uuid, update: UpdateCourseRequest)
    -> Result<Option<Course>>;
    // 删除课程（级联删除其选课记录）
    async fn delete_course(&self, id: Uuid) -> Result<bool>;
    // 统计课程数量
    async fn count_courses(&self) -> Result<u64>;
    // 列出课程的选课记录
    async fn list_course_enrollments(&self, course_id: Uuid) -> Result<Vec<Enrollment>>;
    // 获取课程及其选课记录
    async fn get_course_with_enrollments(&self, id: Uuid)
    -> Result<Option<CourseWithEnrollments>>;

    /// 学生管理方法
    // 创建学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: Uuid) -> Result<Option<Student>>;
    // 列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 更新学生
    async fn update_student(
        &self,
        id: Uuid,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 删除学生（级联删除其选课记录）
    async fn delete_student(&self, id: Uuid) -> Result<bool>;
    // 统计学生数量
    async fn count_students(&self) -> Result<u64>;
    // 列出学生的选课记录
    async fn list_student_enrollments(&self, student_id: Uuid) -> Result<Vec<Enrollment>>;
    // 获取学生及其选课记录
    async fn get_student_with_enrollments(
        &self,
        id: Uuid,
    ) -> Result<Option<StudentWithEnrollments>>;

    /// 选课管理方法
    // 创建选课记录，课程和学生必须存在
    async fn create_enrollment(&self, enrollment: CreateEnrollmentRequest) -> Result<Enrollment>;
    // 通过ID获取选课记录
    async fn get_enrollment_by_id(&self, id: Uuid) -> Result<Option<Enrollment>>;
    // 列出选课记录
    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse>;
    // 更新选课记录
    async fn update_enrollment(
        &self,
        id: Uuid,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>>;
    // 记录或清除成绩
    async fn set_enrollment_grade(&self, id: Uuid, grade: Option<Grade>)
    -> Result<Option<Enrollment>>;
    // 删除选课记录
    async fn delete_enrollment(&self, id: Uuid) -> Result<bool>;
    // 统计选课记录数量
    async fn count_enrollments(&self) -> Result<u64>;
    // 获取选课记录所属课程
    async fn get_enrollment_course(&self, enrollment_id: Uuid) -> Result<Option<Course>>;
    // 获取选课记录所属学生
    async fn get_enrollment_student(&self, enrollment_id: Uuid) -> Result<Option<Student>>;

    /// 生命周期
    // 关闭连接池
    async fn close(&self) -> Result<()>;
}

pub async fn create_storage(options: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async(options).await?;
    Ok(Arc::new(storage))
}
