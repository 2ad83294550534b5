use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "dematik",
    author,
    version,
    about = "Spinning triangle OpenGL demo with a live settings panel"
)]
pub struct Cli {}

pub fn parse() -> Cli {
    Cli::parse()
}
