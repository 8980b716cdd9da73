//! 选课存储操作

use super::{SeaOrmStorage, updated_or_missing};
use crate::entity::enrollments::{ActiveModel, Column};
use crate::entity::prelude::{Courses, Enrollments, Students};
use crate::errors::{Result, StudentInfoError};
use crate::models::{
    PaginationInfo,
    courses::entities::Course,
    enrollments::{
        entities::{Enrollment, Grade},
        requests::{CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest},
        responses::EnrollmentListResponse,
    },
    students::entities::Student,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建选课记录
    ///
    /// 课程或学生不存在时由数据库外键拒绝，返回 `ConstraintViolation`。
    pub async fn create_enrollment_impl(&self, req: CreateEnrollmentRequest) -> Result<Enrollment> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            course_id: Set(req.course_id),
            student_id: Set(req.student_id),
            grade: Set(req.grade.map(|g| g.to_string())),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("创建选课记录失败", e))?;

        debug!(
            "Enrolled student {} in course {}",
            result.student_id, result.course_id
        );
        Ok(result.into_enrollment())
    }

    /// 通过 ID 获取选课记录
    pub async fn get_enrollment_by_id_impl(&self, id: Uuid) -> Result<Option<Enrollment>> {
        let result = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询选课记录失败", e))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 分页列出选课记录
    pub async fn list_enrollments_with_pagination_impl(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Enrollments::find();

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(grade) = query.grade {
            select = select.filter(Column::Grade.eq(grade.to_string()));
        }

        select = select.order_by_asc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询选课记录总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询选课记录页数失败", e))?;

        let enrollments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询选课记录列表失败", e))?;

        Ok(EnrollmentListResponse {
            items: enrollments
                .into_iter()
                .map(|m| m.into_enrollment())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新选课记录
    pub async fn update_enrollment_impl(
        &self,
        id: Uuid,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>> {
        // 先检查选课记录是否存在
        let Some(existing) = self.get_enrollment_by_id_impl(id).await? else {
            return Ok(None);
        };

        if update.course_id.is_none() && update.student_id.is_none() && update.grade.is_none() {
            return Ok(Some(existing));
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(course_id) = update.course_id {
            model.course_id = Set(course_id);
        }

        if let Some(student_id) = update.student_id {
            model.student_id = Set(student_id);
        }

        if let Some(grade) = update.grade {
            model.grade = Set(Some(grade.to_string()));
        }

        let result = updated_or_missing(model.update(&self.db).await, "更新选课记录失败")?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 记录成绩，`None` 表示清除成绩
    pub async fn set_enrollment_grade_impl(
        &self,
        id: Uuid,
        grade: Option<Grade>,
    ) -> Result<Option<Enrollment>> {
        if self.get_enrollment_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            grade: Set(grade.map(|g| g.to_string())),
            ..Default::default()
        };

        let result = updated_or_missing(model.update(&self.db).await, "记录成绩失败")?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 删除选课记录
    pub async fn delete_enrollment_impl(&self, id: Uuid) -> Result<bool> {
        let result = Enrollments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("删除选课记录失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计选课记录数量
    pub async fn count_enrollments_impl(&self) -> Result<u64> {
        let count = Enrollments::find()
            .count(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("统计选课记录数量失败", e))?;

        Ok(count)
    }

    /// 获取选课记录所属课程
    pub async fn get_enrollment_course_impl(&self, enrollment_id: Uuid) -> Result<Option<Course>> {
        let Some(enrollment) = Enrollments::find_by_id(enrollment_id)
            .one(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询选课记录失败", e))?
        else {
            return Ok(None);
        };

        let course = enrollment
            .find_related(Courses)
            .one(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询所属课程失败", e))?;

        Ok(course.map(|m| m.into_course()))
    }

    /// 获取选课记录所属学生
    pub async fn get_enrollment_student_impl(
        &self,
        enrollment_id: Uuid,
    ) -> Result<Option<Student>> {
        let Some(enrollment) = Enrollments::find_by_id(enrollment_id)
            .one(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询选课记录失败", e))?
        else {
            return Ok(None);
        };

        let student = enrollment
            .find_related(Students)
            .one(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询所属学生失败", e))?;

        Ok(student.map(|m| m.into_student()))
    }
}
