pub mod encoding;
pub mod prompt_assembler;
