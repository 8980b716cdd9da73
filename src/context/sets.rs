//! 实体集合句柄
//!
//! 句柄只借用上下文中的存储后端，本身不持有状态。

use uuid::Uuid;

use crate::errors::{Result, StudentInfoError};
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
use crate::storage::Storage;

/// 课程集合
pub struct CourseSet<'a> {
    storage: &'a dyn Storage,
}

impl<'a> CourseSet<'a> {
    pub(super) fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Course>> {
        self.storage.get_course_by_id(id).await
    }

    pub async fn list(&self, query: CourseListQuery) -> Result<CourseListResponse> {
        self.storage.list_courses_with_pagination(query).await
    }

    pub async fn add(&self, course: CreateCourseRequest) -> Result<Course> {
        self.storage.create_course(course).await
    }

    pub async fn update(&self, id: Uuid, update: UpdateCourseRequest) -> Result<Option<Course>> {
        self.storage.update_course(id, update).await
    }

    /// 删除课程，连同其全部选课记录
    pub async fn remove(&self, id: Uuid) -> Result<bool> {
        self.storage.delete_course(id).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.storage.count_courses().await
    }

    /// 课程的选课记录（导航集合）
    pub async fn enrollments_of(&self, course_id: Uuid) -> Result<Vec<Enrollment>> {
        self.storage.list_course_enrollments(course_id).await
    }

    pub async fn find_with_enrollments(&self, id: Uuid) -> Result<Option<CourseWithEnrollments>> {
        self.storage.get_course_with_enrollments(id).await
    }
}

/// 学生集合
pub struct StudentSet<'a> {
    storage: &'a dyn Storage,
}

impl<'a> StudentSet<'a> {
    pub(super) fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Student>> {
        self.storage.get_student_by_id(id).await
    }

    pub async fn list(&self, query: StudentListQuery) -> Result<StudentListResponse> {
        self.storage.list_students_with_pagination(query).await
    }

    pub async fn add(&self, student: CreateStudentRequest) -> Result<Student> {
        self.storage.create_student(student).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.storage.update_student(id, update).await
    }

    /// 删除学生，连同其全部选课记录
    pub async fn remove(&self, id: Uuid) -> Result<bool> {
        self.storage.delete_student(id).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.storage.count_students().await
    }

    /// 学生的选课记录（导航集合）
    pub async fn enrollments_of(&self, student_id: Uuid) -> Result<Vec<Enrollment>> {
        self.storage.list_student_enrollments(student_id).await
    }

    pub async fn find_with_enrollments(
        &self,
        id: Uuid,
    ) -> Result<Option<StudentWithEnrollments>> {
        self.storage.get_student_with_enrollments(id).await
    }
}

/// 选课集合
pub struct EnrollmentSet<'a> {
    storage: &'a dyn Storage,
}

impl<'a> EnrollmentSet<'a> {
    pub(super) fn new(storage: &'a dyn Storage) -> Self {
        Self { storage }
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Enrollment>> {
        self.storage.get_enrollment_by_id(id).await
    }

    pub async fn list(&self, query: EnrollmentListQuery) -> Result<EnrollmentListResponse> {
        self.storage.list_enrollments_with_pagination(query).await
    }

    /// 创建选课记录；引用不存在的课程或学生时返回 `ConstraintViolation`
    pub async fn add(&self, enrollment: CreateEnrollmentRequest) -> Result<Enrollment> {
        self.storage.create_enrollment(enrollment).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>> {
        self.storage.update_enrollment(id, update).await
    }

    /// 记录成绩；传入 `None` 清除成绩
    pub async fn set_grade(&self, id: Uuid, grade: Option<Grade>) -> Result<Option<Enrollment>> {
        self.storage.set_enrollment_grade(id, grade).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<bool> {
        self.storage.delete_enrollment(id).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.storage.count_enrollments().await
    }

    /// 按外键查找所属课程
    pub async fn course_of(&self, enrollment: &Enrollment) -> Result<Course> {
        self.storage
            .get_course_by_id(enrollment.course_id)
            .await?
            .ok_or_else(|| {
                StudentInfoError::not_found(format!("Course {} not found", enrollment.course_id))
            })
    }

    /// 按外键查找所属学生
    pub async fn student_of(&self, enrollment: &Enrollment) -> Result<Student> {
        self.storage
            .get_student_by_id(enrollment.student_id)
            .await?
            .ok_or_else(|| {
                StudentInfoError::not_found(format!("Student {} not found", enrollment.student_id))
            })
    }

    /// 通过关联关系查找选课记录所属课程，记录不存在时返回 `None`
    pub async fn find_course(&self, enrollment_id: Uuid) -> Result<Option<Course>> {
        self.storage.get_enrollment_course(enrollment_id).await
    }

    /// 通过关联关系查找选课记录所属学生，记录不存在时返回 `None`
    pub async fn find_student(&self, enrollment_id: Uuid) -> Result<Option<Student>> {
        self.storage.get_enrollment_student(enrollment_id).await
    }
}
