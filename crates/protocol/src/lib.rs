#![forbid(unsafe_code)]

mod body;
mod command;
mod parse;
mod tokenize;

pub use body::{
    CommandRequest, ErrorResponse, GetQuery, HealthResponse, LengthResponse, QPushRequest,
    SetRequest, StatusResponse, ValueResponse,
};
pub use command::{Command, SetCondition, SetOptions};
pub use parse::Parse;
pub use tokenize::tokenize;
