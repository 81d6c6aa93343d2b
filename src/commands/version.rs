use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("pulsecheck version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
