pub mod naver;
pub mod rate_parser;
