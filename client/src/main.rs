fn main() {
    client::app::run_demo_app();
}
