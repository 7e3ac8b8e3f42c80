//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: define the todo and profile aggregates with their invariants, the
//! ports adapters implement, and the services driving them. Nothing in this
//! module depends on HTTP or database frameworks.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - TraceId: request correlation identifier in task-local scope.
//! - Todo and its value objects, plus [`TodoService`].
//! - Profile and its value objects, plus [`ProfileService`].

pub mod error;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod timestamp;
pub mod todo;
pub mod todo_service;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::profile::{
    Level, Profile, ProfileDraft, ProfileId, ProfileMutation, ProfileValidationError,
    USERNAME_MAX, Username,
};
pub use self::profile_service::ProfileService;
pub use self::todo::{
    CATEGORY_MAX, Category, DEFAULT_CATEGORY, TODO_TEXT_MAX, Todo, TodoDraft, TodoId, TodoMutation,
    TodoText, TodoValidationError,
};
pub use self::todo_service::TodoService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
