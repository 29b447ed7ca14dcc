//! Oracle Adapter - OpenAI-Compatible Decision Endpoint

pub mod openai;

pub use openai::{OpenAiOracle, OpenAiOracleProvider};
