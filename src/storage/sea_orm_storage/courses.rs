//! 课程存储操作

use super::{SeaOrmStorage, updated_or_missing};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::errors::{Result, StudentInfoError};
use crate::models::{
    PaginationInfo,
    courses::{
        entities::Course,
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::{CourseListResponse, CourseWithEnrollments},
    },
    enrollments::entities::Enrollment,
};
use crate::utils::contains_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(req.title),
            credits: Set(req.credits),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("创建课程失败", e))?;

        debug!("Created course {}", result.id);
        Ok(result.into_course())
    }

    /// 通过 ID 获取课程
    pub async fn get_course_by_id_impl(&self, id: Uuid) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询课程失败", e))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 分页列出课程
    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        let (page, size) = query.pagination.normalized();

        let mut select = Courses::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(Column::Title.like(contains_pattern(search.trim())));
        }

        // 排序
        select = select.order_by_asc(Column::Title).order_by_asc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询课程总数失败", e))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询课程页数失败", e))?;

        let courses = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询课程列表失败", e))?;

        Ok(CourseListResponse {
            items: courses.into_iter().map(|m| m.into_course()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新课程信息
    pub async fn update_course_impl(
        &self,
        id: Uuid,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        // 先检查课程是否存在
        let Some(existing) = self.get_course_by_id_impl(id).await? else {
            return Ok(None);
        };

        if update.title.is_none() && update.credits.is_none() {
            return Ok(Some(existing));
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(credits) = update.credits {
            model.credits = Set(credits);
        }

        let result = updated_or_missing(model.update(&self.db).await, "更新课程失败")?;

        Ok(result.map(|m| m.into_course()))
    }

    /// 删除课程，其选课记录由外键级联删除
    pub async fn delete_course_impl(&self, id: Uuid) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("删除课程失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计课程数量
    pub async fn count_courses_impl(&self) -> Result<u64> {
        let count = Courses::find()
            .count(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("统计课程数量失败", e))?;

        Ok(count)
    }

    /// 列出课程的选课记录
    pub async fn list_course_enrollments_impl(&self, course_id: Uuid) -> Result<Vec<Enrollment>> {
        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::CourseId.eq(course_id))
            .order_by_asc(EnrollmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询课程选课记录失败", e))?;

        Ok(enrollments.into_iter().map(|m| m.into_enrollment()).collect())
    }

    /// 获取课程及其选课记录
    pub async fn get_course_with_enrollments_impl(
        &self,
        id: Uuid,
    ) -> Result<Option<CourseWithEnrollments>> {
        let mut rows = Courses::find_by_id(id)
            .find_with_related(Enrollments)
            .all(&self.db)
            .await
            .map_err(|e| StudentInfoError::from_db_err("查询课程及选课记录失败", e))?;

        Ok(rows.pop().map(|(course, enrollments)| CourseWithEnrollments {
            course: course.into_course(),
            enrollments: enrollments
                .into_iter()
                .map(|m| m.into_enrollment())
                .collect(),
        }))
    }
}
