//! 预导入模块，方便使用

pub use super::courses::Entity as Courses;
pub use super::enrollments::Entity as Enrollments;
pub use super::students::Entity as Students;
