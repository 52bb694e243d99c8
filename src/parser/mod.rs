pub mod dump_parser;
pub mod inference;
pub mod stack_line;
pub mod thread;
pub mod token_extractor;
