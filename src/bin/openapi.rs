use anyhow::Result;

// Print the OpenAPI document so it can be committed or fed to client generators.
fn main() -> Result<()> {
    let doc = aula::api::openapi();
    let json = serde_json::to_string_pretty(&doc)?;
    println!("{json}");
    Ok(())
}
