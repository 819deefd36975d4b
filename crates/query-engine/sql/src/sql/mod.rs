//! The dialect-neutral push-down query tree and the text buffer it is rendered into.

pub mod ast;
pub mod functions;
pub mod helpers;
pub mod string;
