//! Type definitions

pub mod building;
pub mod conflict;
pub mod route;
pub mod summary;
pub mod task;

pub use building::*;
pub use conflict::*;
pub use route::*;
pub use summary::*;
pub use task::*;
