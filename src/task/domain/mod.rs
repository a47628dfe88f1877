//! Domain model for task lifecycle management.
//!
//! The task domain models categorised user tasks, the restricted status
//! state machine, and the regeneration copy rule, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod category;
mod error;
mod ids;
mod status;
mod task;
mod title;

pub use category::Category;
pub use error::{ParseCategoryError, ParseTaskStatusError, TaskDomainError};
pub use ids::{TaskId, UserId};
pub use status::TaskStatus;
pub use task::{PersistedTaskData, Task};
pub use title::TaskTitle;
