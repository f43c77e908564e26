use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::status::TaskStatus;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Task {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub client_id: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub due_date: NaiveDate,
    pub client_id: Option<u32>,
}

impl TaskDraft {
    pub fn into_task(self, id: u32) -> Task {
        Task {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            status: self.status,
            due_date: self.due_date,
            client_id: self.client_id,
        }
    }
}
