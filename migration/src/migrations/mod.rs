pub mod m202601150002_create_quiz_questions;
pub mod m202601150003_create_quiz_options;
pub mod m202601150004_create_quiz_results;
