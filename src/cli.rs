use std::env;
use std::io::{self, Write};
use flatvec::FlatIndex;

pub enum Command {
    New { dimension: usize },
    Add { vec: Vec<f32> },
    Search { vec: Vec<f32>, k: usize },
    Get { id: usize },
    Count,
    Info,
    Reset,
    Save { path: String },
    Load { path: String },
}

/// Parse a command from a provided argument vector
/// This is used both for command-line args and REPL input
pub fn parse_command_from_args(args: &[String]) -> Result<Command, String> {
    if args.len() < 2 {
        return Err("No command provided. Use: new, add, search, get, count, info, reset, save, load".to_string());
    }

    let command = &args[1];

    match command.as_str() {
        "new" => parse_new(&args),
        "add" => parse_add(&args),
        "search" => parse_search(&args),
        "get" => parse_get(&args),
        "count" => parse_count(&args),
        "info" => parse_info(&args),
        "reset" => parse_reset(&args),
        "save" => parse_save(&args),
        "load" => parse_load(&args),
        _ => Err(format!("Unknown command: {}. Available: new, add, search, get, count, info, reset, save, load", command)),
    }
}

/// Parse the 'new' command
/// Usage: flatvec new <dimension>
fn parse_new(args: &[String]) -> Result<Command, String> {
    // args[0] = program name
    // args[1] = "new"
    // args[2] = dimension (required)
    if args.len() < 3 {
        return Err("'new' command requires a dimension. Usage: flatvec new <dimension>".to_string());
    }

    match args[2].parse::<usize>() {
        Ok(dimension) => Ok(Command::New { dimension }),
        Err(_) => Err(format!("Invalid dimension: '{}'. Must be a positive integer.", args[2])),
    }
}

/// Parse the 'add' command
/// Usage: flatvec add <v1> <v2> ...
fn parse_add(args: &[String]) -> Result<Command, String> {
    // args[0] = program name
    // args[1] = "add"
    // args[2..] = vector (required, at least 1)
    if args.len() < 3 {
        return Err("'add' command requires a vector. Usage: flatvec add <v1> <v2> ...".to_string());
    }

    let vec: Result<Vec<f32>, _> = args[2..].iter()
        .map(|s| s.parse::<f32>())
        .collect();

    match vec {
        Ok(v) => Ok(Command::Add { vec: v }),
        Err(_) => Err("Vector parsing error".to_string()),
    }
}

/// Parse the 'search' command
/// Usage: flatvec search <v1> <v2> ... [--k <number>]
fn parse_search(args: &[String]) -> Result<Command, String> {
    // args[0] = program name
    // args[1] = "search"
    // args[2..] = vector components and optional --k flag

    if args.len() < 3 {
        return Err("'search' command requires at least one vector component. Usage: flatvec search <v1> <v2> ... [--k <number>]".to_string());
    }

    let mut k = 5; // default value
    let mut vector_end = args.len();

    // Check if last two args are --k and a number
    if args.len() >= 4 && args[args.len() - 2] == "--k" {
        // Try to parse the last argument as k
        match args[args.len() - 1].parse::<usize>() {
            Ok(parsed) => {
                k = parsed;
                vector_end = args.len() - 2; // Exclude --k and the number
            }
            Err(_) => {
                return Err(format!("Invalid --k value: '{}'. Must be a non-negative integer.", args[args.len() - 1]));
            }
        }
    }

    // Parse vector components from args[2] to vector_end
    let vec: Result<Vec<f32>, _> = args[2..vector_end].iter()
        .map(|s| s.parse::<f32>())
        .collect();

    match vec {
        Ok(v) => {
            if v.is_empty() {
                return Err("Search vector cannot be empty".to_string());
            }
            Ok(Command::Search { vec: v, k })
        }
        Err(_) => Err("Failed to parse vector components as numbers".to_string()),
    }
}

/// Parse the 'get' command
/// Usage: flatvec get <id>
fn parse_get(args: &[String]) -> Result<Command, String> {
    // args[0] = program name
    // args[1] = "get"
    // args[2] = id (required)

    if args.len() < 3 {
        return Err("'get' command requires an identifier. Usage: flatvec get <id>".to_string());
    }

    match args[2].parse::<usize>() {
        Ok(id) => Ok(Command::Get { id }),
        Err(_) => Err(format!("Invalid identifier: '{}'. Must be a non-negative integer.", args[2])),
    }
}

/// Parse the 'count' command
/// Usage: flatvec count
fn parse_count(args: &[String]) -> Result<Command, String> {
    // Count takes no arguments
    if args.len() > 2 {
        eprintln!("Warning: 'count' command takes no arguments, ignoring extras");
    }

    Ok(Command::Count)
}

/// Parse the 'info' command
/// Usage: flatvec info
fn parse_info(args: &[String]) -> Result<Command, String> {
    // Info takes no arguments
    if args.len() > 2 {
        eprintln!("Warning: 'info' command takes no arguments, ignoring extras");
    }

    Ok(Command::Info)
}

/// Parse the 'reset' command
/// Usage: flatvec reset
fn parse_reset(args: &[String]) -> Result<Command, String> {
    // Reset takes no arguments
    if args.len() > 2 {
        eprintln!("Warning: 'reset' command takes no arguments, ignoring extras");
    }

    Ok(Command::Reset)
}

/// Parse the 'save' command
/// Usage: flatvec save <path>
fn parse_save(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'save' command requires a file path. Usage: save <path>".to_string());
    }
    let path = args[2].clone();
    Ok(Command::Save { path })
}

/// Parse the 'load' command
/// Usage: flatvec load <path>
fn parse_load(args: &[String]) -> Result<Command, String> {
    if args.len() < 3 {
        return Err("'load' command requires a file path. Usage: load <path>".to_string());
    }
    let path = args[2].clone();
    Ok(Command::Load { path })
}

/// REPL mode - interactive session with a persistent index
pub fn run_repl(index: &mut Option<FlatIndex>) {
    println!("flatvec - Exact Vector Search");
    println!("Type 'help' for commands, 'exit' or 'quit' to quit\n");

    loop {
        print!("flatvec> ");
        io::stdout().flush().unwrap();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(_) => {}
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                continue;
            }
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input == "exit" || input == "quit" {
            println!("Goodbye!");
            break;
        }

        if input == "help" {
            print_help();
            continue;
        }

        let mut args: Vec<String> = vec!["flatvec".to_string()];
        args.extend(input.split_whitespace().map(|s| s.to_string()));

        let command = match parse_command_from_args(&args) {
            Ok(cmd) => cmd,
            Err(error) => {
                eprintln!("Error: {}", error);
                continue;
            }
        };

        execute_command(index, command);
    }
}

/// Single-command mode - load index from path, execute command, save back
/// Usage: flatvec <index_path> <command> [args...]
pub fn run_single_command() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: flatvec <index_path> <command> [args...]");
        std::process::exit(1);
    }

    let index_path = &args[1];

    // Load existing index if the file is there; 'new' can create one
    let mut index = if std::path::Path::new(index_path).exists() {
        match FlatIndex::load(index_path) {
            Ok(loaded) => Some(loaded),
            Err(e) => {
                eprintln!("Error loading '{}': {}", index_path, e);
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    // Rebuild args: shift so args[1] becomes the command
    let shifted_args: Vec<String> = std::iter::once(args[0].clone())
        .chain(args[2..].iter().cloned())
        .collect();

    let command = match parse_command_from_args(&shifted_args) {
        Ok(cmd) => cmd,
        Err(error) => {
            eprintln!("Error: {}", error);
            std::process::exit(1);
        }
    };

    execute_command(&mut index, command);

    // Save index back to path
    if let Some(index) = &index {
        if let Err(e) = index.save(index_path) {
            eprintln!("Error saving '{}': {}", index_path, e);
            std::process::exit(1);
        }
    }
}

fn execute_command(index_slot: &mut Option<FlatIndex>, command: Command) {
    // 'new' and 'load' work without an index; everything else needs one
    match command {
        Command::New { dimension } => {
            match FlatIndex::new(dimension) {
                Ok(created) => {
                    *index_slot = Some(created);
                    println!("Created index with dimension {}", dimension);
                }
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Load { path } => {
            match FlatIndex::load(&path) {
                Ok(loaded) => {
                    let count = loaded.ntotal();
                    *index_slot = Some(loaded);
                    println!("Index loaded from '{}' ({} vectors)", path, count);
                }
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        other => {
            let index = match index_slot.as_mut() {
                Some(index) => index,
                None => {
                    eprintln!("Error: No index. Use 'new <dimension>' or 'load <path>' first");
                    return;
                }
            };

            execute_index_command(index, other);
        }
    }
}

fn execute_index_command(index: &mut FlatIndex, command: Command) {
    match command {
        Command::New { .. } | Command::Load { .. } => unreachable!(),

        Command::Add { vec } => {
            match index.add(&[vec]) {
                Ok(()) => println!("Added vector with id {}", index.ntotal() - 1),
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Search { vec, k } => {
            match index.search(&[vec], k) {
                Ok(results) => {
                    let matches = &results[0];
                    if matches.is_empty() {
                        println!("No results found");
                    } else {
                        println!("Top {} results:", matches.len());
                        for (rank, neighbor) in matches.iter().enumerate() {
                            println!("{}. ID: {}, Distance: {:.4}",
                                rank + 1, neighbor.id, neighbor.distance);
                        }
                    }
                }
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Get { id } => {
            match index.get(id) {
                Ok(vector) => println!("Vector {}: {:?}", id, vector),
                Err(error) => eprintln!("Error: {}", error),
            }
        }

        Command::Count => println!("{}", index.ntotal()),

        Command::Info => {
            println!("Dimension: {}", index.dim());
            println!("Vectors:   {}", index.ntotal());
            println!("Trained:   {}", index.is_trained());
        }

        Command::Reset => {
            index.reset();
            println!("Index reset, {} vectors remain", index.ntotal());
        }

        Command::Save { path } => {
            match index.save(&path) {
                Ok(()) => println!("Index saved to '{}'", path),
                Err(error) => eprintln!("Error: {}", error),
            }
        }
    }
}

fn print_help() {
    println!("Available commands:");
    println!("  new <dimension>              - Create an empty index");
    println!("  add <v1> <v2> ...            - Add a vector");
    println!("  search <v1> <v2> ... [--k N] - Search nearest vectors (default k=5)");
    println!("  get <id>                     - Retrieve a vector by identifier");
    println!("  count                        - Show vector count");
    println!("  info                         - Show dimension, count, trained state");
    println!("  reset                        - Remove all vectors");
    println!("  save <path>                  - Save index to file");
    println!("  load <path>                  - Load index from file");
    println!("  help                         - Show this help");
    println!("  exit, quit                   - Exit the program");
}
