fn main() {
    picopatt_pipeline::cli::run();
}
