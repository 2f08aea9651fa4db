pub mod context;
pub mod contact_commands;
pub mod note_commands;
pub mod tag_commands;

use std::path::Path;

use rusqlite::Connection;

use crate::db::schema;
use context::CliContext;

/// Run the interactive REPL.
pub fn run(db_path: &Path) {
    println!("propcrm - contact and listing manager");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let conn = match Connection::open(db_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            return;
        }
    };

    if let Err(e) = schema::initialize(&conn) {
        eprintln!("Error initializing database: {}", e);
        return;
    }

    let ctx = CliContext::new(conn);
    repl_loop(&ctx);
}

fn repl_loop(ctx: &CliContext) {
    loop {
        let Some(line) = ctx.read_line("> ") else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, args) = match line.split_once(' ') {
            Some((command, args)) => (command, args.trim()),
            None => (line, ""),
        };

        match command {
            "help" => print_help(),
            "list" => contact_commands::list(ctx),
            "show" => contact_commands::show(ctx, args),
            "add" => contact_commands::add(ctx, args),
            "edit" => contact_commands::edit(ctx, args),
            "meta" => contact_commands::set_meta(ctx, args),
            "delete" => contact_commands::delete(ctx, args),
            "note" => note_commands::add_note(ctx, args),
            "feed" => note_commands::feed(ctx, args),
            "listing" => note_commands::add_listing(ctx, args),
            "tag" => tag_commands::tag(ctx, args),
            "untag" => tag_commands::untag(ctx, args),
            "tags" => tag_commands::list_tags(ctx),
            "category" => tag_commands::category(ctx, args),
            "exit" | "quit" | "q" => break,
            other => {
                println!("Unknown command '{}'. Type 'help' for commands.", other);
            }
        }

        // Anything still queued was not consumed by the command; show it
        // rather than letting it block the next request.
        for notice in ctx.notices.drain() {
            println!("  [{}] {}", notice.code, notice.message);
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  list                      List all contacts");
    println!("  show <contact>            Show a contact's profile");
    println!("  add [name]                Create a contact");
    println!("  edit <contact>            Edit name/email");
    println!("  meta <contact> <k> [v]    Set (or clear) a meta field");
    println!("  delete <contact>          Delete a contact");
    println!("  note <contact>            Log a note");
    println!("  feed <contact> [page]     Show the activity feed");
    println!("  listing <contact>         Add a listing for a contact");
    println!("  tag <contact> <name>      Tag a contact");
    println!("  untag <contact> <name>    Remove a tag");
    println!("  tags                      List tag definitions");
    println!("  category <contact> [v]    Set or clear the category");
    println!("  exit                      Quit");
}
