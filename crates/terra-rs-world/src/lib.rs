//! World data model: coordinates, block states, sections, chunks, and the host store.

pub mod block;
pub mod chunk;
pub mod chunk_index;
pub mod coords;
pub mod memory;
pub mod section;
pub mod store;

pub use block::BlockState;
pub use chunk::{Chunk, ChunkRef, ChunkRefExt};
pub use chunk_index::ChunkIndex;
pub use coords::{BlockPos, ChunkPos};
pub use memory::MemoryWorldStore;
pub use section::VerticalSection;
pub use store::{NotifyFlags, WorldStore};
