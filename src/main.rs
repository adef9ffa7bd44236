use clap::Parser;
use pinitup::cli::{
    handle_add, handle_clear, handle_delete, handle_init, handle_list, handle_move, handle_show,
    Cli, Commands,
};
use pinitup::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Init => handle_init(),
        Commands::Add { text, stdin, json } => handle_add(text, stdin, json),
        Commands::List { json } => handle_list(json),
        Commands::Show { id, json } => handle_show(id, json),
        Commands::Delete { id } => handle_delete(id),
        Commands::Move { id, before } => handle_move(id, before),
        Commands::Clear { force } => handle_clear(force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
