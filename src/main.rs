fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Click Chess - terminal");
    click_chess::terminal::run_interactive_terminal();
}
