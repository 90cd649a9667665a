//! Domain logic - pure text transformations independent of git and the filesystem

pub mod prologue;
pub mod substitution;
pub mod version;

pub use prologue::Prologue;
pub use substitution::{SubstitutionTable, Tokens, Value};
pub use version::VersionTag;
