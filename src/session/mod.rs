pub mod edit_session;
pub mod engine;
pub mod monitor;
pub(crate) mod queue;
