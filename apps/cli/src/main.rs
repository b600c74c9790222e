mod commands;
mod config;
mod main_lib;
mod render;

use std::io::Write;

use commands::Command;
use config::Config;
use main_lib::{build_controller, execute, init_tracing, on_update, screen, Flow};
use tokio::io::{AsyncBufReadExt, BufReader};

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();
    let mut controller = build_controller(&config)?;

    controller.start();
    println!("TickerTracker - type 'help' for commands\n");
    println!("{}", screen(&controller));
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match line.parse::<Command>() {
                    Ok(command) => {
                        let (flow, output) = execute(&mut controller, command).await;
                        println!("{}", output);
                        if flow == Flow::Exit {
                            break;
                        }
                    }
                    Err(e) => println!("{}", e),
                }
                prompt();
            }
            Some(update) = controller.next_update(), if controller.has_pending_work() => {
                if let Some(output) = on_update(&controller, &update) {
                    println!("\n{}", output);
                    prompt();
                }
            }
        }
    }

    tracing::info!("Exiting");
    Ok(())
}
