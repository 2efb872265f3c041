//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts where the table is written here

pub mod course;
pub mod enrollment;
pub mod recommendation;
pub mod skill;
pub mod tag;
pub mod user;
