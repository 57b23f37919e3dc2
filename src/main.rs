use mascot::App;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    App::new().run()?;
    Ok(())
}
