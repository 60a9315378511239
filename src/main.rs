fn main() {
    pbkit::cli::run();
}
