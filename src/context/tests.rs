use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::StudentInformationContext;
use crate::config::DatabaseConfig;
use crate::errors::StudentInfoError;
use crate::models::{
    courses::requests::CreateCourseRequest,
    enrollments::{entities::Grade, requests::CreateEnrollmentRequest},
    students::requests::CreateStudentRequest,
};
use crate::storage::sea_orm_storage::SeaOrmStorage;

async fn open() -> StudentInformationContext {
    StudentInformationContext::new(DatabaseConfig::in_memory())
        .await
        .expect("context should open")
}

fn ada() -> CreateStudentRequest {
    CreateStudentRequest {
        last_name: "Lovelace".to_string(),
        first_mid_name: "Ada".to_string(),
        enrollment_date: Utc::now(),
    }
}

fn algorithms() -> CreateCourseRequest {
    CreateCourseRequest {
        title: "Algorithms".to_string(),
        credits: 3,
    }
}

#[tokio::test]
async fn test_grade_recorded_after_ungraded_enrollment() {
    let context = open().await;

    let student = context.students().add(ada()).await.unwrap();
    let course = context.courses().add(algorithms()).await.unwrap();
    let enrollment = context
        .enrollments()
        .add(CreateEnrollmentRequest {
            course_id: course.id,
            student_id: student.id,
            grade: None,
        })
        .await
        .unwrap();

    let reloaded = context
        .enrollments()
        .find(enrollment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.grade, None);

    context
        .enrollments()
        .set_grade(enrollment.id, Some(Grade::A))
        .await
        .unwrap();

    let reloaded = context
        .enrollments()
        .find(enrollment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.grade, Some(Grade::A));

    context.dispose().await.unwrap();
}

#[tokio::test]
async fn test_enrollment_visible_from_both_sides() {
    let context = open().await;

    let student = context.students().add(ada()).await.unwrap();
    let course = context.courses().add(algorithms()).await.unwrap();
    let enrollment = context
        .enrollments()
        .add(CreateEnrollmentRequest {
            course_id: course.id,
            student_id: student.id,
            grade: Some(Grade::B),
        })
        .await
        .unwrap();

    let from_student = context.students().enrollments_of(student.id).await.unwrap();
    let from_course = context.courses().enrollments_of(course.id).await.unwrap();
    assert_eq!(from_student, vec![enrollment.clone()]);
    assert_eq!(from_course, vec![enrollment.clone()]);

    assert_eq!(
        context.enrollments().course_of(&enrollment).await.unwrap(),
        course
    );
    assert_eq!(
        context.enrollments().student_of(&enrollment).await.unwrap(),
        student
    );
    assert_eq!(
        context.enrollments().find_course(enrollment.id).await.unwrap(),
        Some(course.clone())
    );
    assert_eq!(
        context
            .enrollments()
            .find_student(enrollment.id)
            .await
            .unwrap(),
        Some(student.clone())
    );

    let detail = context
        .courses()
        .find_with_enrollments(course.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.enrollments.len(), 1);
}

#[tokio::test]
async fn test_missing_reference_is_a_constraint_violation() {
    let context = open().await;
    let course = context.courses().add(algorithms()).await.unwrap();

    let err = context
        .enrollments()
        .add(CreateEnrollmentRequest {
            course_id: course.id,
            student_id: Uuid::new_v4(),
            grade: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.code(), "E004");
}

#[tokio::test]
async fn test_navigation_to_deleted_owner_is_not_found() {
    let context = open().await;

    let student = context.students().add(ada()).await.unwrap();
    let course = context.courses().add(algorithms()).await.unwrap();
    let enrollment = context
        .enrollments()
        .add(CreateEnrollmentRequest {
            course_id: course.id,
            student_id: student.id,
            grade: None,
        })
        .await
        .unwrap();

    assert!(context.courses().remove(course.id).await.unwrap());

    let err = context
        .enrollments()
        .course_of(&enrollment)
        .await
        .unwrap_err();
    assert!(matches!(err, StudentInfoError::NotFound(_)));

    // 级联删除后选课记录本身也不存在
    assert!(
        context
            .enrollments()
            .find(enrollment.id)
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(context.enrollments().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_scope_returns_work_result() {
    let count = StudentInformationContext::scope(DatabaseConfig::in_memory(), |context| {
        Box::pin(async move {
            context.courses().add(algorithms()).await?;
            context.courses().count().await
        })
    })
    .await
    .unwrap();

    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_scope_propagates_work_error() {
    let result: crate::errors::Result<()> =
        StudentInformationContext::scope(DatabaseConfig::in_memory(), |_context| {
            Box::pin(async move { Err(StudentInfoError::not_found("nothing here")) })
        })
        .await;

    assert_eq!(
        result.unwrap_err(),
        StudentInfoError::not_found("nothing here")
    );
}

#[tokio::test]
async fn test_open_rejects_unsupported_url() {
    let options = DatabaseConfig {
        url: "ftp://example.com/school".to_string(),
        ..DatabaseConfig::in_memory()
    };

    let err = match StudentInformationContext::new(options).await {
        Ok(_) => panic!("unsupported URL should not open"),
        Err(e) => e,
    };
    assert!(matches!(err, StudentInfoError::DatabaseConfig(_)));
}

#[tokio::test]
async fn test_context_over_shared_storage() {
    let storage = SeaOrmStorage::new_async(&DatabaseConfig::in_memory())
        .await
        .unwrap();
    let storage = Arc::new(storage);

    let first = StudentInformationContext::from_storage(storage.clone());
    let second = StudentInformationContext::from_storage(storage);

    first.students().add(ada()).await.unwrap();
    assert_eq!(second.students().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_disposing_shared_context_keeps_pool_open() {
    let storage = Arc::new(
        SeaOrmStorage::new_async(&DatabaseConfig::in_memory())
            .await
            .unwrap(),
    );

    let first = StudentInformationContext::from_storage(storage.clone());
    let second = StudentInformationContext::from_storage(storage.clone());

    first.students().add(ada()).await.unwrap();
    first.dispose().await.unwrap();

    assert_eq!(second.students().count().await.unwrap(), 1);
    second.students().add(ada()).await.unwrap();
    assert_eq!(storage.count_students_impl().await.unwrap(), 2);
}

async fn owning_context() -> (Arc<SeaOrmStorage>, StudentInformationContext) {
    let storage = Arc::new(
        SeaOrmStorage::new_async(&DatabaseConfig::in_memory())
            .await
            .unwrap(),
    );
    let context = StudentInformationContext {
        storage: storage.clone(),
        owns_storage: true,
    };
    (storage, context)
}

#[tokio::test]
async fn test_scope_closes_storage_after_success() {
    let (storage, context) = owning_context().await;

    let count = context
        .run(|context| {
            Box::pin(async move {
                context.courses().add(algorithms()).await?;
                context.courses().count().await
            })
        })
        .await
        .unwrap();
    assert_eq!(count, 1);

    let err = storage.count_courses_impl().await.unwrap_err();
    assert!(matches!(err, StudentInfoError::DatabaseConnection(_)));
}

#[tokio::test]
async fn test_scope_closes_storage_after_error() {
    let (storage, context) = owning_context().await;

    let result: crate::errors::Result<()> = context
        .run(|_context| {
            Box::pin(async move { Err(StudentInfoError::not_found("nothing here")) })
        })
        .await;
    assert_eq!(
        result.unwrap_err(),
        StudentInfoError::not_found("nothing here")
    );

    let err = storage.count_courses_impl().await.unwrap_err();
    assert!(matches!(err, StudentInfoError::DatabaseConnection(_)));
}
