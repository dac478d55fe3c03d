pub mod branches;
pub mod git;
pub mod prune;
