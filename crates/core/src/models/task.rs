use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ZendoError, ZendoResult};

/// 任务
///
/// 系统中唯一的实体。每个任务属于一个 `(week_date, day_of_week)` 分桶，
/// 两者之间的一致性不做校验。
///
/// # 字段说明
///
/// - `id`: 存储层分配的唯一标识，创建后不变
/// - `title`: 任务标题，非空
/// - `completed`: 是否已完成，创建时为 `false`
/// - `day_of_week`: 小写星期名称，如 `"monday"`
/// - `week_date`: 所在周周日的日期 `YYYY-MM-DD`
/// - `tags`: 逗号分隔的标签，原样保存
/// - `created_at`: 创建时间
/// - `updated_at`: 最后更新时间，每次修改都会刷新
///
/// # 使用示例
///
/// ```rust
/// use chrono::Utc;
/// use zendo_core::models::Task;
///
/// let now = Utc::now();
/// let task = Task {
///     id: 1,
///     title: "Buy milk".to_string(),
///     completed: false,
///     day_of_week: "monday".to_string(),
///     week_date: "2024-01-07".to_string(),
///     tags: "errand".to_string(),
///     created_at: now,
///     updated_at: now,
/// };
///
/// let json = serde_json::to_value(&task).unwrap();
/// assert_eq!(json["dayOfWeek"], "monday");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub day_of_week: String,
    pub week_date: String,
    pub tags: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn entity_description(&self) -> String {
        format!("任务 '{}'", self.title)
    }
}

/// 新建任务所需的字段
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTask {
    pub title: String,
    pub day_of_week: String,
    pub week_date: String,
    pub tags: String,
}

impl NewTask {
    pub const REQUIRED_FIELDS_MESSAGE: &'static str =
        "Title, dayOfWeek, and weekDate are required";

    pub fn validate(&self) -> ZendoResult<()> {
        if self.title.is_empty() || self.day_of_week.is_empty() || self.week_date.is_empty() {
            return Err(ZendoError::validation(Self::REQUIRED_FIELDS_MESSAGE));
        }
        Ok(())
    }
}

/// 更新任务时整体覆盖的字段
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskChanges {
    pub title: String,
    pub completed: bool,
    pub day_of_week: String,
    pub week_date: String,
    pub tags: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(title: &str, day: &str, week: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            day_of_week: day.to_string(),
            week_date: week.to_string(),
            tags: String::new(),
        }
    }

    #[test]
    fn test_new_task_requires_fields() {
        assert!(new_task("Buy milk", "monday", "2024-01-07").validate().is_ok());

        for task in [
            new_task("", "monday", "2024-01-07"),
            new_task("Buy milk", "", "2024-01-07"),
            new_task("Buy milk", "monday", ""),
        ] {
            match task.validate() {
                Err(ZendoError::Validation(msg)) => {
                    assert_eq!(msg, NewTask::REQUIRED_FIELDS_MESSAGE)
                }
                other => panic!("Expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_new_task_accepts_free_text_day() {
        // 星期名称不做枚举校验
        assert!(new_task("Stretch", "someday", "2024-01-07").validate().is_ok());
    }

    #[test]
    fn test_task_serializes_camel_case() {
        let now = Utc::now();
        let task = Task {
            id: 7,
            title: "Buy milk".to_string(),
            completed: false,
            day_of_week: "monday".to_string(),
            week_date: "2024-01-07".to_string(),
            tags: "errand,home".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["weekDate"], "2024-01-07");
        assert_eq!(json["dayOfWeek"], "monday");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("day_of_week").is_none());
    }
}
