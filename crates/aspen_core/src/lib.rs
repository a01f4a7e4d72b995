pub mod event;
pub mod session;
pub mod turn;

pub use event::{ChatEvent, EndReason, NoticeKind};
pub use session::{Session, SessionId};
pub use turn::{Role, Turn};
