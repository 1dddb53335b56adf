#![allow(dead_code)]

pub mod agriml_env;
pub mod fake_service;
