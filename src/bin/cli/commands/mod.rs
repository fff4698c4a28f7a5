pub mod review;
pub mod samples;
pub mod scores;
pub mod words;
