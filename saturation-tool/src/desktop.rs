#![windows_subsystem = "windows"]

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    extern crate saturation_tool;

    saturation_tool::desktop_main().await
}
