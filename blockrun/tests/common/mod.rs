//! Common test utilities and macros

use blockrun::config::RunConfig;
use blockrun::io::{CollectSink, MapSource};
use blockrun::value::Integer;
use std::path::Path;

/// Bound used by every test run so a non-terminating program fails instead of hanging.
pub const MAX_STEPS: u64 = 10_000;

#[derive(Debug)]
pub enum TestResult {
    /// The run returned this value and wrote it exactly once.
    Output(String),
    Error(String),
    ErrorRegex(String),
}

impl TestResult {
    pub fn output(value: impl ToString) -> Self {
        TestResult::Output(value.to_string())
    }

    pub fn error_regex(pattern: &str) -> Self {
        TestResult::ErrorRegex(pattern.to_string())
    }
}

impl PartialEq for TestResult {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TestResult::Output(a), TestResult::Output(b)) => a == b,
            (TestResult::Error(a), TestResult::Error(b)) => a == b,
            (TestResult::ErrorRegex(pattern), TestResult::Error(msg))
            | (TestResult::Error(msg), TestResult::ErrorRegex(pattern)) => {
                regex::Regex::new(pattern).unwrap().is_match(msg)
            }
            _ => false,
        }
    }
}

pub fn input_path(file: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("inputs")
        .join(file)
}

pub fn run_program_test(input_file: &Path, vars: &[(&str, i64)]) -> TestResult {
    let mut source: MapSource = vars
        .iter()
        .map(|&(name, value)| (name, Integer::from(value)))
        .collect();
    let mut sink = CollectSink::new();
    let config = RunConfig::default().with_max_steps(MAX_STEPS);

    match blockrun::run_file(input_file, &mut source, &mut sink, config) {
        Ok(outcome) => {
            assert_eq!(
                sink.values,
                vec![outcome.value.clone()],
                "result must be written exactly once"
            );
            TestResult::Output(outcome.value.to_string())
        }
        Err(e) => {
            assert!(sink.values.is_empty(), "failed run wrote {:?}", sink.values);
            TestResult::Error(format!("{e:#}"))
        }
    }
}

#[macro_export]
macro_rules! check_program {
    ($test_name:ident, input=$input_file:expr, vars=[$(($name:expr, $value:expr)),* $(,)?], result=$expected:expr) => {
        #[test]
        fn $test_name() {
            let input_path = crate::common::input_path($input_file);
            let result = crate::common::run_program_test(&input_path, &[$(($name, $value)),*]);
            assert_eq!(result, $expected);
        }
    };
    ($test_name:ident, input=$input_file:expr, result=$expected:expr) => {
        check_program!($test_name, input = $input_file, vars = [], result = $expected);
    };
}
