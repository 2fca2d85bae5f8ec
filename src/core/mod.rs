pub mod explain;
pub mod llm;
pub mod logging;
