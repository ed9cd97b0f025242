pub mod contracts;
pub mod dispatch;
pub mod port;
pub mod session;

pub use contracts::*;
pub use dispatch::*;
pub use port::*;
pub use session::*;
