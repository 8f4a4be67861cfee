pub mod quiz_option;
pub mod quiz_question;
pub mod quiz_result;

pub use quiz_option::Entity as QuizOption;
pub use quiz_question::Entity as QuizQuestion;
pub use quiz_result::Entity as QuizResult;
pub use quiz_test::Entity as QuizTest;
