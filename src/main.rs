fn main() -> Result<(), eframe::Error> {
    // Set up logging for development
    env_logger::init();

    venue_designer::run_app()
}
