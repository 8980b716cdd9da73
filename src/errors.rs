//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 存储层的错误原样向上传递，只做分类，不做吞并。

use std::fmt;

use sea_orm::{DbErr, SqlErr};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_student_info_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum StudentInfoError {
            $($variant(String),)*
        }

        impl StudentInfoError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(StudentInfoError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(StudentInfoError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(StudentInfoError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl StudentInfoError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        StudentInfoError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_student_info_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    ConstraintViolation("E004", "Constraint Violation"),
    NotFound("E005", "Resource Not Found"),
    Migration("E006", "Migration Error"),
}

impl StudentInfoError {
    /// 将 ORM 错误按类别转换，并附带操作上下文
    ///
    /// 外键、唯一约束冲突由数据库报告，归为 `ConstraintViolation`；
    /// 连接获取失败归为 `DatabaseConnection`；其余归为 `DatabaseOperation`。
    pub fn from_db_err(context: &str, err: DbErr) -> Self {
        let message = format!("{context}: {err}");

        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_))
            | Some(SqlErr::UniqueConstraintViolation(_)) => {
                return StudentInfoError::ConstraintViolation(message);
            }
            _ => {}
        }

        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                StudentInfoError::DatabaseConnection(message)
            }
            _ if is_constraint_message(&message) => StudentInfoError::ConstraintViolation(message),
            _ => StudentInfoError::DatabaseOperation(message),
        }
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

// sql_err() 无法识别时回退到错误文本匹配
fn is_constraint_message(message: &str) -> bool {
    let upper = message.to_ascii_uppercase();
    upper.contains("FOREIGN KEY CONSTRAINT") || upper.contains("UNIQUE CONSTRAINT")
}

impl fmt::Display for StudentInfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for StudentInfoError {}

impl From<DbErr> for StudentInfoError {
    fn from(err: DbErr) -> Self {
        StudentInfoError::from_db_err("数据库操作失败", err)
    }
}

pub type Result<T> = std::result::Result<T, StudentInfoError>;
