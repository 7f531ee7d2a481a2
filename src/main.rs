fn main() {
    braq::cli::run();
}
