use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pinitup")]
#[command(version, about = "Expressive sticky notes with random fonts, colors, and moods")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new board in the current directory
    Init,

    /// Pin a new sticky note to the front of the board
    Add {
        /// Note text
        #[arg(required_unless_present = "stdin")]
        text: Option<String>,

        /// Read note text from stdin
        #[arg(long, conflicts_with = "text")]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the board, front to back
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Show {
        /// Note id, unique id prefix, or board position like "2"
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a note from the board
    Delete {
        /// Note id, unique id prefix, or board position
        id: String,
    },

    /// Move a note so it sits immediately before another one
    Move {
        /// Note to move
        id: String,

        /// Note it should end up in front of
        #[arg(long, value_name = "TARGET")]
        before: String,
    },

    /// Remove every note from the board
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },
}
