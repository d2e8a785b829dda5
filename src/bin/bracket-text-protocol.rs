use std::io::{self, Write};

use clap::{CommandFactory, Parser};
use log::{debug, info};

use bracket_editor::{
    COPYRIGHT, LONG_VERSION,
    editor::Editor,
    layout::{LAYOUT_FILE, LayoutConfig},
    participant::Roster,
    utils,
};

/// Bracket Editor
///
/// This edits a tournament bracket one text command per line.
#[derive(Parser, Debug)]
#[command(long_version = LONG_VERSION, about = "Bracket Editor")]
struct Args {
    /// Displays the bracket after every command
    #[arg(long)]
    display_bracket: bool,

    /// Log at the debug level
    #[arg(long)]
    debug: bool,

    /// Read the auto-arrange grid from this RON file
    #[arg(long, value_name = "path")]
    layout: Option<std::path::PathBuf>,

    /// Build the manpage
    #[arg(long)]
    man: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    utils::init_logger(args.debug);

    if args.man {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Args::command()
            .name("bracket-text-protocol")
            .long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-18");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        std::fs::write("bracket-text-protocol.1", buffer)?;
        return Ok(());
    }

    let layout_path = args
        .layout
        .unwrap_or_else(|| utils::config_file(LAYOUT_FILE));
    let mut editor = Editor::new(Roster::default(), LayoutConfig::load(&layout_path)?);
    debug!(
        "layout {}: {:?}",
        layout_path.display(),
        editor.bracket.layout()
    );

    let mut buffer = String::new();
    let stdin = io::stdin();

    if args.display_bracket {
        println!("{editor}");
        println!("Enter 'list_commands' for a list of commands.");
    }

    loop {
        buffer.clear();
        match stdin.read_line(&mut buffer) {
            Ok(0) => break,
            Ok(_) => {}
            Err(error) => {
                println!("? {error}\n");
                break;
            }
        }

        let reply = editor.reply(&buffer);
        if !reply.is_empty() {
            println!("{reply}");
        }

        if args.display_bracket {
            println!("{editor}");
        }

        if editor.quit {
            break;
        }
    }

    info!("quit");
    Ok(())
}
