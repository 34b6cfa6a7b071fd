use super::ITaskRepo;
use crate::repos::shared::inmemory_repo::*;
use eln_reminders_domain::{Task, TaskStatus, ID};

pub struct InMemoryTaskRepo {
    tasks: std::sync::Mutex<Vec<Task>>,
}

impl InMemoryTaskRepo {
    pub fn new() -> Self {
        Self {
            tasks: std::sync::Mutex::new(Vec::new()),
        }
    }
}

fn is_due(task: &Task, due_before: i64, excluded: &[TaskStatus]) -> bool {
    match task.due_ts {
        Some(due) => due <= due_before && !excluded.contains(&task.status),
        None => false,
    }
}

#[async_trait::async_trait]
impl ITaskRepo for InMemoryTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        insert(task, &self.tasks);
        Ok(())
    }

    async fn find(&self, task_id: &ID) -> anyhow::Result<Option<Task>> {
        Ok(find(task_id, &self.tasks))
    }

    async fn find_due_by_user(
        &self,
        user_id: &ID,
        due_before: i64,
        excluded: &[TaskStatus],
    ) -> anyhow::Result<Vec<Task>> {
        Ok(find_by(&self.tasks, |task| {
            task.user_id == *user_id && is_due(task, due_before, excluded)
        }))
    }

    async fn find_users_with_due_tasks(
        &self,
        due_before: i64,
        excluded: &[TaskStatus],
    ) -> anyhow::Result<Vec<ID>> {
        let mut user_ids: Vec<ID> = Vec::new();
        for task in find_by(&self.tasks, |task| is_due(task, due_before, excluded)) {
            if !user_ids.contains(&task.user_id) {
                user_ids.push(task.user_id);
            }
        }
        Ok(user_ids)
    }

    async fn set_last_reminder_sent(&self, task_ids: &[ID], ts: i64) -> anyhow::Result<()> {
        update_many(
            &self.tasks,
            |task| task_ids.contains(&task.id),
            |task| task.last_reminder_sent = Some(ts),
        );
        Ok(())
    }
}
