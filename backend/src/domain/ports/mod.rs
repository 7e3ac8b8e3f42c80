//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod profile_command;
mod profile_query;
mod profile_repository;
mod todo_command;
mod todo_query;
mod todo_repository;

#[cfg(test)]
pub use profile_command::MockProfileCommand;
pub use profile_command::{CreateProfileRequest, ProfileCommand, UpdateProfileRequest};
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::ProfileQuery;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{ProfileRepository, ProfileRepositoryError};
#[cfg(test)]
pub use todo_command::MockTodoCommand;
pub use todo_command::{CreateTodoRequest, TodoCommand, UpdateTodoRequest};
#[cfg(test)]
pub use todo_query::MockTodoQuery;
pub use todo_query::TodoQuery;
#[cfg(test)]
pub use todo_repository::MockTodoRepository;
pub use todo_repository::{TodoRepository, TodoRepositoryError};
