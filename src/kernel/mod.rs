pub mod calc;
pub mod dispatcher;
pub mod event;
pub mod intent;
pub mod session;
