pub mod card;
pub mod memory;
pub mod surface;

pub use card::{CardFooter, GameBadge, MediaCard, ToCard};
pub use memory::{ElementId, MemorySurface, SectionSnapshot, SurfaceSnapshot};
pub use surface::DisplaySurface;
