
mod report_test;
