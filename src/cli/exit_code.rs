use super::run::RunOutput;

pub fn exit_code_from_output(output: &RunOutput) -> i32 {
    if output.report.has_failures() { 1 } else { 0 }
}
