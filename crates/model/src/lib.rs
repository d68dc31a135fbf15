#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod category;
pub mod question;
pub mod quiz;

pub use category::Category;
pub use question::{NewQuestion, Question};
pub use quiz::{QuizCategory, QuizRequest};
