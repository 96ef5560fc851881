mod support;

mod archive_test;
mod orchestrator_test;
