fn main() {
    range_grader::cli::run();
}
