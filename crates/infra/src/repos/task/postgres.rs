use super::ITaskRepo;
use eln_reminders_domain::{Task, TaskStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresTaskRepo {
    pool: PgPool,
}

impl PostgresTaskRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TaskRaw {
    task_uid: Uuid,
    user_uid: Uuid,
    title: String,
    description: Option<String>,
    due_ts: Option<i64>,
    priority: String,
    status: String,
    category: String,
    last_reminder_sent: Option<i64>,
}

#[derive(Debug, FromRow)]
struct TaskOwnerRaw {
    user_uid: Uuid,
}

impl TryFrom<TaskRaw> for Task {
    type Error = anyhow::Error;

    fn try_from(raw: TaskRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.task_uid.into(),
            user_id: raw.user_uid.into(),
            title: raw.title,
            description: raw.description,
            due_ts: raw.due_ts,
            priority: raw.priority.parse()?,
            status: raw.status.parse()?,
            category: raw.category,
            last_reminder_sent: raw.last_reminder_sent,
        })
    }
}

fn to_status_list(statuses: &[TaskStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

#[async_trait::async_trait]
impl ITaskRepo for PostgresTaskRepo {
    async fn insert(&self, task: &Task) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks(
                task_uid,
                user_uid,
                title,
                description,
                due_ts,
                priority,
                status,
                category,
                last_reminder_sent
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(task.id.inner_ref())
        .bind(task.user_id.inner_ref())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_ts)
        .bind(task.priority.as_str())
        .bind(task.status.as_str())
        .bind(&task.category)
        .bind(task.last_reminder_sent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, task_id: &ID) -> anyhow::Result<Option<Task>> {
        let task: Option<TaskRaw> = sqlx::query_as(
            r#"
            SELECT * FROM tasks AS t
            WHERE t.task_uid = $1
            "#,
        )
        .bind(task_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        task.map(Task::try_from).transpose()
    }

    async fn find_due_by_user(
        &self,
        user_id: &ID,
        due_before: i64,
        excluded: &[TaskStatus],
    ) -> anyhow::Result<Vec<Task>> {
        let tasks: Vec<TaskRaw> = sqlx::query_as(
            r#"
            SELECT * FROM tasks AS t
            WHERE t.user_uid = $1 AND
            t.due_ts IS NOT NULL AND
            t.due_ts <= $2 AND
            NOT (t.status = ANY($3))
            ORDER BY t.due_ts ASC
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(due_before)
        .bind(to_status_list(excluded))
        .fetch_all(&self.pool)
        .await?;

        tasks.into_iter().map(Task::try_from).collect()
    }

    async fn find_users_with_due_tasks(
        &self,
        due_before: i64,
        excluded: &[TaskStatus],
    ) -> anyhow::Result<Vec<ID>> {
        let owners: Vec<TaskOwnerRaw> = sqlx::query_as(
            r#"
            SELECT DISTINCT t.user_uid FROM tasks AS t
            WHERE t.due_ts IS NOT NULL AND
            t.due_ts <= $1 AND
            NOT (t.status = ANY($2))
            "#,
        )
        .bind(due_before)
        .bind(to_status_list(excluded))
        .fetch_all(&self.pool)
        .await?;

        Ok(owners.into_iter().map(|o| o.user_uid.into()).collect())
    }

    async fn set_last_reminder_sent(&self, task_ids: &[ID], ts: i64) -> anyhow::Result<()> {
        let task_ids = task_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();

        sqlx::query(
            r#"
            UPDATE tasks
            SET last_reminder_sent = $1
            WHERE task_uid = ANY($2)
            "#,
        )
        .bind(ts)
        .bind(task_ids)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
