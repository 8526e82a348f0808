//! Application services for board actions.

mod actions;
mod result;
mod view;

pub use actions::{BoardService, BoardServiceError, BoardServiceResult};
pub use result::{ActionErrorKind, ActionFailure, ActionResult, FailureDetails};
pub use view::BoardViewCache;
