use super::*;

mod common;
mod grant;
