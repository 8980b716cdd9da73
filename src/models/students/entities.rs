use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    // 学生ID
    pub id: Uuid,
    // 姓
    pub last_name: String,
    // 名（含中间名）
    pub first_mid_name: String,
    // 入学时间（精确到秒）
    pub enrollment_date: chrono::DateTime<chrono::Utc>,
}
