//! The 2x2 population window.
//!
//! While a chunk is being populated, generators may only touch the chunk
//! itself and its three neighbours in the +X/+Z direction: those are the
//! chunks guaranteed to be fully generated. The window caches handles to the
//! four chunks and decides what a lookup outside of them returns.

use terra_rs_world::{ChunkIndex, ChunkPos, ChunkRef, WorldStore};
use tracing::{debug, trace, warn};

use crate::config::WorldConfig;
use crate::error::GenError;

/// Index of a chunk inside the window: `dx | (dz << 1)`.
#[inline]
fn window_slot(dx: i32, dz: i32) -> Option<usize> {
    ((dx == 0 || dx == 1) && (dz == 0 || dz == 1)).then_some((dx | (dz << 1)) as usize)
}

/// Lifecycle state of the population window.
#[derive(Debug, Default)]
pub enum PopulationWindowState {
    #[default]
    Inactive,
    Active {
        /// Top-left (lowest X and Z) chunk of the window.
        origin: ChunkPos,
        /// Row-major 2x2 handles; `None` where the store had no chunk.
        chunks: [Option<ChunkRef>; 4],
    },
}

#[derive(Debug, Default)]
pub struct PopulationWindow {
    state: PopulationWindowState,
}

impl PopulationWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PopulationWindowState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, PopulationWindowState::Active { .. })
    }

    /// Anchor of the active window.
    pub fn origin(&self) -> Option<ChunkPos> {
        match self.state {
            PopulationWindowState::Active { origin, .. } => Some(origin),
            PopulationWindowState::Inactive => None,
        }
    }

    /// Load and cache the four chunks anchored at `origin`.
    ///
    /// With bounds checking off an active window is silently replaced.
    pub fn start<S: WorldStore + ?Sized>(
        &mut self,
        origin: ChunkPos,
        index: &ChunkIndex<'_, S>,
        config: &WorldConfig,
    ) -> Result<(), GenError> {
        if let PopulationWindowState::Active { origin: active, .. } = self.state {
            if config.population.bounds_check {
                return Err(GenError::AlreadyPopulating {
                    active,
                    requested: origin,
                });
            }
            warn!("replacing population window at {active} with {origin}");
        }

        let chunks = index.load_four(origin);
        debug!(
            "population started at {origin} ({} of 4 chunks loaded)",
            chunks.iter().flatten().count()
        );
        self.state = PopulationWindowState::Active { origin, chunks };
        Ok(())
    }

    /// Drop the cached chunks.
    pub fn end(&mut self, config: &WorldConfig) -> Result<(), GenError> {
        match std::mem::take(&mut self.state) {
            PopulationWindowState::Active { origin, .. } => {
                debug!("population ended at {origin}");
                Ok(())
            }
            PopulationWindowState::Inactive if config.population.bounds_check => {
                Err(GenError::NotPopulating)
            }
            PopulationWindowState::Inactive => Ok(()),
        }
    }

    /// Chunk containing `(x, y, z)`, subject to the window policy.
    pub fn lookup<S: WorldStore + ?Sized>(
        &self,
        x: i32,
        y: i32,
        z: i32,
        index: &ChunkIndex<'_, S>,
        config: &WorldConfig,
    ) -> Option<ChunkRef> {
        if !config.in_vertical_bounds(y) {
            return None;
        }
        let target = ChunkIndex::<S>::resolve(x, z);

        let (origin, chunks) = match &self.state {
            // Outside population: tree growing, tooling, etc.
            PopulationWindowState::Inactive => return index.load_direct(target),
            PopulationWindowState::Active { origin, chunks } => (*origin, chunks),
        };

        match window_slot(target.x - origin.x, target.z - origin.z) {
            Some(slot) => chunks[slot].clone(),
            None if config.population.bounds_check => None,
            None => {
                trace!("read of {target} outside population window at {origin}");
                index.load_direct(target)
            }
        }
    }

    /// The four chunks anchored at `origin`, for passes that walk whole chunks.
    ///
    /// Uses the cached handles when the active window is anchored at `origin`.
    /// Otherwise loads the chunks without installing them, unless bounds
    /// checking is on and a different window is active.
    pub fn chunk_cache<S: WorldStore + ?Sized>(
        &self,
        origin: ChunkPos,
        index: &ChunkIndex<'_, S>,
        config: &WorldConfig,
    ) -> Result<[Option<ChunkRef>; 4], GenError> {
        match &self.state {
            PopulationWindowState::Active {
                origin: active,
                chunks,
            } if *active == origin => Ok(chunks.clone()),
            PopulationWindowState::Active { origin: active, .. }
                if config.population.bounds_check =>
            {
                Err(GenError::WindowMismatch {
                    active: *active,
                    requested: origin,
                })
            }
            PopulationWindowState::Active { origin: active, .. } => {
                warn!("population window is at {active}, using a temporary cache for {origin}");
                Ok(index.load_four(origin))
            }
            PopulationWindowState::Inactive => Ok(index.load_four(origin)),
        }
    }
}
