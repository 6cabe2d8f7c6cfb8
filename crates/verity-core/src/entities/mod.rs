//! Entity structs for Verity domain objects.
//!
//! `Task` maps to the `tasks` table. Structs derive `Serialize`, `Deserialize`,
//! and `JsonSchema` for JSON output and schema validation.

mod task;

pub use task::Task;
