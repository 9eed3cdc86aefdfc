#![allow(dead_code)]

pub mod cli_runner;
