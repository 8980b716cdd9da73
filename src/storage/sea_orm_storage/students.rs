//! 学生存储操作

use super::{SeaOrmStorage, updated_or_missing};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, StudentInfoError};
use crate::models::{
    PaginationInfo,
    enrollments::entities::Enrollment,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::{StudentListResponse, StudentWithEnrollments},
    },
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use tracing::debug;
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            last_name: Set(req.last_name),
            first_mid_name: Set(req.first_mid_name),
            enrollment_date: Set(req.enrollment_date),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("创建学生失败", e))?;

        debug!("Created student {}", result.id);
        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: Uuid) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询学生失败", e))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Students::find();

        // 搜索条件：姓或名
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let search = search.trim();
            select = select.filter(
                Condition::any()
                    .add(Column::LastName.like(contains_pattern(search)))
                    .add(Column::FirstMidName.like(contains_pattern(search))),
            );
        }

        // 排序
        select = select
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstMidName)
            .order_by_asc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询学生总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询学生页数失败", e))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询学生列表失败", e))?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新学生信息
    pub async fn update_student_impl(
        &self,
        id: Uuid,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        // 先检查学生是否存在
        let Some(existing) = self.get_student_by_id_impl(id).await? else {
            return Ok(None);
        };

        if update.last_name.is_none()
            && update.first_mid_name.is_none()
            && update.enrollment_date.is_none()
        {
            return Ok(Some(existing));
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(last_name) = update.last_name {
            model.last_name = Set(last_name);
        }

        if let Some(first_mid_name) = update.first_mid_name {
            model.first_mid_name = Set(first_mid_name);
        }

        if let Some(enrollment_date) = update.enrollment_date {
            model.enrollment_date = Set(enrollment_date);
        }

        let result = updated_or_missing(model.update(&self.db).await, "更新学生失败")?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 删除学生，其选课记录由外键级联删除
    pub async fn delete_student_impl(&self, id: Uuid) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("删除学生失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计学生数量
    pub async fn count_students_impl(&self) -> Result<u64> {
        let count = Students::find()
            .count(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("统计学生数量失败", e))?;

        Ok(count)
    }

    /// 列出学生的选课记录
    pub async fn list_student_enrollments_impl(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<Enrollment>> {
        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .order_by_asc(EnrollmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询学生选课记录失败", e))?;

        Ok(enrollments.into_iter().map(|m| m.into_enrollment()).collect())
    }

    /// 获取学生及其选课记录
    pub async fn get_student_with_enrollments_impl(
        &self,
        id: Uuid,
    ) -> Result<Option<StudentWithEnrollments>> {
        let mut rows = Students::find_by_id(id)
            .find_with_related(Enrollments)
            .all(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询学生及选课记录失败", e))?;

        Ok(rows.pop().map(|(student, enrollments)| StudentWithEnrollments {
            student: student.into_student(),
            enrollments: enrollments
                .into_iter()
                .map(|m| m.into_enrollment())
                .collect(),
        }))
    }
}
