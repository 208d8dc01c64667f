//! Headless replay tool (native).

#[cfg(feature = "native")]
mod cli {
    use clap::{Parser, Subcommand};
    use mnist_canvas_app::{ReplayError, Script, run_script};
    use std::path::PathBuf;

    #[derive(Parser)]
    #[command(name = "mnist-canvas", version, about = "MNIST drawing canvas tools")]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Replay a scripted session and print the host messages as JSON lines
        Replay {
            /// Script file (JSON)
            script: PathBuf,
            /// Write the final canvas to this PNG file
            #[arg(long)]
            png: Option<PathBuf>,
            /// Reject render payloads with missing or invalid fields instead of using defaults
            #[arg(long)]
            strict: bool,
        },
    }

    pub fn run() -> Result<(), ReplayError> {
        match Cli::parse().command {
            Command::Replay { script, png, strict } => {
                log::info!("Replaying {}", script.display());
                let script = Script::from_path(&script)?;
                if strict {
                    script.validate()?;
                }
                let replay = run_script(script);
                for message in &replay.messages {
                    println!("{}", serde_json::to_string(message)?);
                }
                if let Some(path) = png {
                    replay.write_png(&path)?;
                    log::info!("Canvas written to {}", path.display());
                }
                Ok(())
            }
        }
    }
}

#[cfg(feature = "native")]
fn main() {
    env_logger::init();

    if let Err(e) = cli::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    eprintln!("Native feature not enabled. Use `cargo run --features native`");
}
