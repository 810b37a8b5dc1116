//! 题目解析层
//!
//! 全部为纯函数，没有 I/O，也没有共享的可变状态：
//!
//! ```text
//! question_text → normalizer → segmenter (sanitizer) ─┐
//! filename ───────────────────→ year ─────────────────┼→ assembler → ParsedQuestion
//! id / question_number / answer_text ─────────────────┘
//! ```

pub mod assembler;
pub mod normalizer;
pub mod sanitizer;
pub mod segmenter;
pub mod year;

pub use assembler::{coerce_int, parse_question};
pub use normalizer::normalize;
pub use sanitizer::sanitize_choice;
pub use segmenter::{
    extract_choices, extract_choices_fallback, extract_title_and_body, Choices, TitleBody,
    CHOICE_COUNT,
};
pub use year::{extract_year, UNKNOWN_YEAR};
