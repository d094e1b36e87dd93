// src/main.rs

fn main() -> anyhow::Result<()> {
    env_logger::init();
    qviz::run_app()
}
