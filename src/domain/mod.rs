//! Domain logic - pure business rules independent of the external services

pub mod commit;
pub mod flag;
pub mod tag;
pub mod ticket;

pub use commit::CommitRecord;
pub use flag::to_boolean;
pub use tag::{resolve_tag, ReleaseTag, TagIndex, TagRef};
pub use ticket::{Ticket, TicketDetails, TicketKey, TicketPattern};
