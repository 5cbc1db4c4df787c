use clap::Args;

use super::Runtime;
use crate::error::ScaffoldResult;
use crate::ui;

/// List registered tasks
#[derive(Args, Debug, Default)]
pub struct TasksCommand {}

impl TasksCommand {
    pub fn run(&self, rt: &Runtime<'_>) -> ScaffoldResult<()> {
        rt.ctx.puts(ui::section("Registered tasks"));
        for name in rt.registry.names() {
            rt.ctx.puts(format!("  {name}"));
        }
        Ok(())
    }
}
