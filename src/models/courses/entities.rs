use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    // 课程ID
    pub id: Uuid,
    // 课程名称
    pub title: String,
    // 学分
    pub credits: i32,
}
