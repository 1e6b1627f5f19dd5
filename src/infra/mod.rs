pub mod file_system;
pub mod ignore_rules;
pub mod input;
pub mod logger;
pub mod output;
