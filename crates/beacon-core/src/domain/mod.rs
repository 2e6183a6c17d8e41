//! Domain model (IDs, stacks, status records, reports, errors).

pub mod caller;
pub mod endpoint;
pub mod errors;
pub mod ids;
pub mod report;
pub mod stack;
pub mod status;

pub use caller::{CallerContext, UserRole};
pub use endpoint::{Endpoint, EndpointKind};
pub use errors::{
    AuthorizationError, DenyReason, DirectoryError, ErrorKind, JournalError, RecordError,
    StatusUpdateError, StoreError, ValidationError,
};
pub use ids::{EdgeStackId, EndpointId};
pub use report::{StatusReport, ValidReport};
pub use stack::{EdgeStack, StackStatusMap};
pub use status::{StatusKind, StatusRecord};
