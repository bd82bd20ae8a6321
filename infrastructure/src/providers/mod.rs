//! Model backend adapters implementing [`LlmGateway`](crew_application::LlmGateway).

pub mod openai;
