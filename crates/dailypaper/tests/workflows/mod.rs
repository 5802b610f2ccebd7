use super::*;

mod download;
