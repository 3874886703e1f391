use terra_rs_world::{ChunkIndex, ChunkPos, WorldStore};

use super::TerrainWorld;
use crate::error::GenError;
use crate::window::PopulationWindow;

impl<S: WorldStore> TerrainWorld<S> {
    /// Open the population window anchored at `chunk`.
    pub fn start_population(&mut self, chunk: ChunkPos) -> Result<(), GenError> {
        let index = ChunkIndex::new(&self.store);
        self.window
            .start(chunk, &index, &self.config)
    }

    /// Close the population window.
    pub fn end_population(&mut self) -> Result<(), GenError> {
        self.window.end(&self.config)
    }

    /// Run `populate` with the window anchored at `chunk`, closing it afterwards.
    pub fn populate<R>(
        &mut self,
        chunk: ChunkPos,
        populate: impl FnOnce(&Self) -> R,
    ) -> Result<R, GenError> {
        self.start_population(chunk)?;
        let result = populate(&*self);
        self.end_population()?;
        Ok(result)
    }

    pub fn is_populating(&self) -> bool {
        self.window.is_active()
    }

    pub fn population_window(&self) -> &PopulationWindow {
        &self.window
    }
}
