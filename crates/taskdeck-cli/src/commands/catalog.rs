use std::io::Write;

use anyhow::{Context, anyhow};
use taskdeck_core::api::Transport;
use taskdeck_shared::{CategoryCreate, CategoryUpdate, TagCreate};
use tracing::instrument;

use super::Session;
use crate::cli::{CategoryCommand, TagCommand};

fn check_color(color: &str) -> anyhow::Result<()> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(anyhow!("color must look like #RRGGBB, got {color}"))
    }
}

impl<T, W, C> Session<T, W, C>
where
    T: Transport,
    W: Write,
    C: FnMut(&str) -> anyhow::Result<bool>,
{
    #[instrument(skip(self))]
    pub(super) async fn category(&mut self, cmd: CategoryCommand) -> anyhow::Result<()> {
        let categories = self.client.categories();
        match cmd {
            CategoryCommand::List => {
                let list = categories.list().await.context("failed to list categories")?;
                self.renderer.categories(&mut self.out, &list)
            }
            CategoryCommand::Show { id } => {
                let category = categories
                    .get(id)
                    .await
                    .with_context(|| format!("failed to fetch category {id}"))?;
                self.renderer.categories(&mut self.out, &[category])
            }
            CategoryCommand::Add { name, color } => {
                if let Some(color) = &color {
                    check_color(color)?;
                }
                let category = categories
                    .create(&CategoryCreate { name, color })
                    .await
                    .context("failed to create category")?;
                self.say(format_args!("Created category {}.", category.id))
            }
            CategoryCommand::Edit { id, name, color } => {
                if let Some(color) = &color {
                    check_color(color)?;
                }
                let update = CategoryUpdate { name, color };
                if update == CategoryUpdate::default() {
                    return Err(anyhow!("nothing to update; pass --name or --color"));
                }
                let category = categories
                    .update(id, &update)
                    .await
                    .with_context(|| format!("failed to update category {id}"))?;
                self.renderer.categories(&mut self.out, &[category])
            }
            CategoryCommand::Delete { id, yes } => {
                if !self.confirmation(yes, &format!("Delete category {id}?"))?.is_confirmed() {
                    return self.say("Cancelled.");
                }
                self.client
                    .categories()
                    .delete(id)
                    .await
                    .with_context(|| format!("failed to delete category {id}"))?;
                self.say(format_args!("Deleted category {id}."))
            }
            CategoryCommand::Assign { id, task } => {
                categories
                    .assign(id, task)
                    .await
                    .context("failed to assign category")?;
                self.say(format_args!("Task {task} is now in category {id}."))
            }
            CategoryCommand::Unassign { id, task } => {
                categories
                    .unassign(id, task)
                    .await
                    .context("failed to unassign category")?;
                self.say(format_args!("Task {task} removed from category {id}."))
            }
            CategoryCommand::Tasks { id } => {
                let tasks = categories
                    .tasks(id)
                    .await
                    .with_context(|| format!("failed to list tasks in category {id}"))?;
                self.renderer.task_table(&mut self.out, &tasks, self.now)
            }
        }
    }

    #[instrument(skip(self))]
    pub(super) async fn tag(&mut self, cmd: TagCommand) -> anyhow::Result<()> {
        let tags = self.client.tags();
        match cmd {
            TagCommand::List => {
                let list = tags.list().await.context("failed to list tags")?;
                self.renderer.tags(&mut self.out, &list)
            }
            TagCommand::Show { id } => {
                let tag = tags
                    .get(id)
                    .await
                    .with_context(|| format!("failed to fetch tag {id}"))?;
                self.renderer.tags(&mut self.out, &[tag])
            }
            TagCommand::Add { name } => {
                let tag = tags
                    .create(&TagCreate { name })
                    .await
                    .context("failed to create tag")?;
                self.say(format_args!("Created tag {}.", tag.id))
            }
            TagCommand::Rename { id, name } => {
                let tag = tags
                    .update(id, &TagCreate { name })
                    .await
                    .with_context(|| format!("failed to rename tag {id}"))?;
                self.renderer.tags(&mut self.out, &[tag])
            }
            TagCommand::Delete { id, yes } => {
                if !self.confirmation(yes, &format!("Delete tag {id}?"))?.is_confirmed() {
                    return self.say("Cancelled.");
                }
                self.client
                    .tags()
                    .delete(id)
                    .await
                    .with_context(|| format!("failed to delete tag {id}"))?;
                self.say(format_args!("Deleted tag {id}."))
            }
            TagCommand::Assign { id, task } => {
                tags.assign(id, task).await.context("failed to assign tag")?;
                self.say(format_args!("Tagged task {task} with tag {id}."))
            }
            TagCommand::Unassign { id, task } => {
                tags.unassign(id, task).await.context("failed to unassign tag")?;
                self.say(format_args!("Removed tag {id} from task {task}."))
            }
            TagCommand::Tasks { id } => {
                let tasks = tags
                    .tasks(id)
                    .await
                    .with_context(|| format!("failed to list tasks with tag {id}"))?;
                self.renderer.task_table(&mut self.out, &tasks, self.now)
            }
        }
    }
}
