//! Inventory operations: projects, blocks and plot generation.
//!
//! Deletes cascade: removing any slice of the inventory tree also removes
//! the bookings on the contained plots, those bookings' transactions, and
//! the documents attached to the plots. Deleting an unknown id is a
//! no-op.

use crate::environment::LedgerEnvironment;
use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::types::{Block, BlockId, NewBlock, Plot, PlotId, PlotStatus, Project, ProjectId};

impl Ledger {
    /// Creates a project with an empty block list
    ///
    /// Always succeeds.
    pub fn create_project(&mut self, env: &LedgerEnvironment, name: impl Into<String>) -> Project {
        let project = Project {
            id: ProjectId::new(),
            name: name.into(),
            created_at: env.now(),
            blocks: Vec::new(),
        };
        self.projects.push(project.clone());
        project
    }

    /// Creates a block under a project and generates its plots
    ///
    /// Plots are numbered `"{prefix}-{i}"` for `i` in `1..=plot_count`,
    /// all start [`PlotStatus::Available`] and share the given size and
    /// price. Each plot gets an independent surrogate id plus
    /// `project_id`/`block_id` foreign keys.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if the project does not exist.
    pub fn create_block(&mut self, project_id: ProjectId, spec: NewBlock) -> LedgerResult<Block> {
        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| LedgerError::not_found("project", project_id))?;

        let block_id = BlockId::new();
        let plots = (1..=spec.plot_count)
            .map(|i| Plot {
                id: PlotId::new(),
                project_id,
                block_id,
                number: format!("{}-{i}", spec.plot_prefix),
                size: spec.plot_size.clone(),
                price: spec.price,
                status: PlotStatus::Available,
                booked_by: None,
            })
            .collect();

        let block = Block {
            id: block_id,
            name: spec.name,
            plots,
        };
        project.blocks.push(block.clone());
        Ok(block)
    }

    /// Deletes a project and everything under it
    ///
    /// Cascades over all plots in all of the project's blocks. Unknown
    /// ids are a no-op.
    pub fn delete_project(&mut self, project_id: ProjectId) {
        let Some(index) = self.projects.iter().position(|p| p.id == project_id) else {
            return;
        };

        let project = self.projects.remove(index);
        let plot_ids: Vec<PlotId> = project
            .blocks
            .iter()
            .flat_map(|b| b.plots.iter())
            .map(|p| p.id)
            .collect();
        self.purge_plot_references(&plot_ids);
    }

    /// Deletes a block and everything under it
    ///
    /// Unknown ids are a no-op.
    pub fn delete_block(&mut self, project_id: ProjectId, block_id: BlockId) {
        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            return;
        };
        let Some(index) = project.blocks.iter().position(|b| b.id == block_id) else {
            return;
        };

        let block = project.blocks.remove(index);
        let plot_ids: Vec<PlotId> = block.plots.iter().map(|p| p.id).collect();
        self.purge_plot_references(&plot_ids);
    }

    /// Deletes a single plot
    ///
    /// Unknown ids are a no-op.
    pub fn delete_plot(&mut self, project_id: ProjectId, block_id: BlockId, plot_id: PlotId) {
        let Some(block) = self
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .and_then(|p| p.blocks.iter_mut().find(|b| b.id == block_id))
        else {
            return;
        };

        let before = block.plots.len();
        block.plots.retain(|p| p.id != plot_id);
        if block.plots.len() == before {
            return;
        }

        self.purge_plot_references(&[plot_id]);
    }
}
