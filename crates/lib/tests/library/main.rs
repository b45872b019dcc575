mod common;
mod projection_tests;
mod walk_tests;
