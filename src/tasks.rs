use crate::api::EcsApi;
use crate::error::MonError;
use crate::helpers::{image_tag, short_id};
use std::collections::HashMap;

/// DescribeTasks accepts at most this many ids per call.
const DESCRIBE_TASKS_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatus {
    pub task_definition_arn: String,
    pub last_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub task_id: String,
    pub task_definition: String,
    pub status: String,
    pub image_tag: Option<String>,
}

/// Image tag of the last container in the task definition, `None` when it
/// has no containers.
pub async fn resolve_image_tag(
    ecs: &dyn EcsApi,
    task_definition: &str,
) -> Result<Option<String>, MonError> {
    let images = ecs.task_definition_images(task_definition).await?;
    Ok(images.last().map(|image| image_tag(image).to_string()))
}

/// Status of each requested task, aligned with `task_ids`. Tasks are matched
/// back by the id in their ARN since DescribeTasks does not promise to keep
/// the request order; ids it did not return come back as `None`.
pub async fn describe_tasks(
    ecs: &dyn EcsApi,
    cluster: &str,
    task_ids: &[String],
) -> Result<Vec<Option<TaskStatus>>, MonError> {
    let mut by_id = HashMap::with_capacity(task_ids.len());
    for chunk in task_ids.chunks(DESCRIBE_TASKS_LIMIT) {
        for task in ecs.task_summaries(cluster, chunk).await? {
            by_id.insert(
                short_id(&task.task_arn).to_string(),
                TaskStatus {
                    task_definition_arn: task.task_definition_arn,
                    last_status: task.last_status,
                },
            );
        }
    }

    Ok(task_ids.iter().map(|id| by_id.remove(id)).collect())
}

pub async fn build_task_rows(
    ecs: &dyn EcsApi,
    task_ids: &[String],
    cluster: &str,
) -> Result<Vec<TaskRow>, MonError> {
    let statuses = describe_tasks(ecs, cluster, task_ids).await?;

    let mut rows = Vec::with_capacity(task_ids.len());
    for (task_id, status) in task_ids.iter().zip(statuses) {
        let row = match status {
            Some(status) => TaskRow {
                task_id: task_id.clone(),
                task_definition: short_id(&status.task_definition_arn).to_string(),
                image_tag: resolve_image_tag(ecs, &status.task_definition_arn).await?,
                status: status.last_status,
            },
            None => TaskRow {
                task_id: task_id.clone(),
                task_definition: "-".to_string(),
                status: "MISSING".to_string(),
                image_tag: None,
            },
        };
        rows.push(row);
    }

    Ok(rows)
}
