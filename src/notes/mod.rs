//! Release-note synthesis: ticket details, entry rendering and page assembly

pub mod assembler;
pub mod details;
pub mod mutations;
pub mod render;

pub use assembler::{Document, NoteAssembler, NotesRequest};
pub use details::TicketDetailExtractor;
pub use render::RenderedEntry;
