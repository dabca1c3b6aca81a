pub mod cli;
pub mod outcome_writer;
