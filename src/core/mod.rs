pub mod chatbot;
pub mod map;
pub mod replies;
pub mod responder;
pub mod selector;
pub mod services;
pub mod session;
pub mod traits;
