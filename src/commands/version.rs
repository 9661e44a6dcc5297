use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("jnx-enrich version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
