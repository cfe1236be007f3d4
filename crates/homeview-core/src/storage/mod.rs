mod notes;

pub use notes::{Note, NoteStore};
