//! One-shot subcommands: each loads the tasks file, applies one operation, and prints the result.

use crate::error::Result;
use crate::output::{emit_success, write_missing_file, write_view, OutputOptions, Palette};
use crate::repository::{find_by_id, TaskRepository};
use crate::task::Task;

fn load(repo: &TaskRepository, options: OutputOptions) -> Result<Vec<Task>> {
    let loaded = repo.load()?;
    if loaded.missing && !options.json {
        write_missing_file(
            &mut std::io::stderr(),
            repo.store().path(),
            Palette::new(options.color),
        )?;
    }
    Ok(loaded.tasks)
}

fn report(options: OutputOptions, command: &str, task: Option<&Task>, message: &str) -> Result<()> {
    let palette = Palette::new(options.color);
    let human = format!("{}\n", palette.ok(&format!("✅ {message}")));
    emit_success(options, command, &task, &human)
}

pub fn run_add(
    repo: &TaskRepository,
    options: OutputOptions,
    description: &str,
    deadline: &str,
) -> Result<()> {
    let tasks = load(repo, options)?;
    let tasks = repo.add(&tasks, description, deadline)?;
    // The new task carries the highest id.
    let added = tasks.iter().max_by_key(|t| t.id);
    let message = match added {
        Some(task) => format!("Task {} added successfully!", task.id),
        None => "Task added successfully!".to_string(),
    };
    report(options, "add", added, &message)
}

pub fn run_list(repo: &TaskRepository, options: OutputOptions) -> Result<()> {
    let tasks = load(repo, options)?;
    let view = repo.list_view(&tasks);

    let mut human = Vec::new();
    write_view(&mut human, &view, Palette::new(options.color))?;
    emit_success(options, "list", &view, &String::from_utf8_lossy(&human))
}

pub fn run_edit(
    repo: &TaskRepository,
    options: OutputOptions,
    id: u32,
    description: &str,
    deadline: &str,
) -> Result<()> {
    let tasks = load(repo, options)?;
    let tasks = repo.edit(&tasks, id, description, deadline)?;
    report(
        options,
        "edit",
        find_by_id(&tasks, id),
        &format!("Task {id} updated successfully"),
    )
}

pub fn run_delete(repo: &TaskRepository, options: OutputOptions, id: u32) -> Result<()> {
    let tasks = load(repo, options)?;
    repo.delete(&tasks, id)?;
    report(
        options,
        "delete",
        None,
        &format!("Task {id} deleted successfully"),
    )
}

pub fn run_done(repo: &TaskRepository, options: OutputOptions, id: u32) -> Result<()> {
    let tasks = load(repo, options)?;
    let tasks = repo.mark_completed(&tasks, id)?;
    report(
        options,
        "done",
        find_by_id(&tasks, id),
        &format!("Task {id} marked as completed!"),
    )
}
