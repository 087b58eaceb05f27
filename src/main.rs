//! `gendersdb` – query a genders file from the command line.
//!
//! ```text
//! gendersdb [-f FILE] [--json] -q QUERY     nodes matching a query
//! gendersdb [-f FILE] -v NODE ATTR          value of one attribute
//! gendersdb [-f FILE] [--json] -l           every node
//! gendersdb [-f FILE] -a                    every attribute key
//! ```
//! The genders file defaults to the `database` setting (see `gendersdb::config`).

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use gendersdb::config::Settings;
use gendersdb::{Database, Record};

const USAGE: &str = "usage: gendersdb [-f FILE] [--json] (-q QUERY | -v NODE ATTR | -l | -a)";

#[derive(Debug)]
enum Command {
    Query(String),
    Value(String, String),
    List,
    Attributes,
}

#[derive(Debug)]
struct Arguments {
    file: Option<PathBuf>,
    json: bool,
    command: Command,
}

fn parse_arguments(mut args: impl Iterator<Item = String>) -> Result<Arguments, String> {
    let mut file = None;
    let mut json = false;
    let mut command = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-f" => file = Some(PathBuf::from(args.next().ok_or("-f requires a file")?)),
            "--json" => json = true,
            "-q" => command = Some(Command::Query(args.next().ok_or("-q requires a query")?)),
            "-v" => {
                let node = args.next().ok_or("-v requires a node")?;
                let attr = args.next().ok_or("-v requires an attribute")?;
                command = Some(Command::Value(node, attr));
            }
            "-l" => command = Some(Command::List),
            "-a" => command = Some(Command::Attributes),
            other => return Err(format!("unrecognized argument: {}", other)),
        }
    }
    let command = command.ok_or("no command given")?;
    Ok(Arguments { file, json, command })
}

fn print_nodes(nodes: &[&Record], json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(nodes)?);
    } else {
        for node in nodes {
            println!("{}", node.name());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            Settings::default()
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let arguments = match parse_arguments(std::env::args().skip(1)) {
        Ok(arguments) => arguments,
        Err(message) => {
            eprintln!("{}\n{}", message, USAGE);
            return ExitCode::from(2);
        }
    };
    debug!(?arguments, ?settings, "starting");

    let path = arguments.file.unwrap_or(settings.database);
    let database = match Database::open(&path) {
        Ok(database) => database,
        Err(e) => {
            error!(error = %e, "failed to load genders database");
            return ExitCode::FAILURE;
        }
    };

    let printed = match arguments.command {
        Command::Query(query) => match database.query(&query) {
            Ok(nodes) => print_nodes(&nodes, arguments.json),
            Err(e) => {
                error!(error = %e, "query failed");
                return ExitCode::FAILURE;
            }
        },
        Command::List => {
            let nodes: Vec<&Record> = database.nodes().iter().collect();
            print_nodes(&nodes, arguments.json)
        }
        Command::Value(node, attr) => match database.node_attr(&node, &attr) {
            Some(value) => {
                println!("{}", value);
                Ok(())
            }
            None => return ExitCode::FAILURE,
        },
        Command::Attributes => {
            for key in database.attributes() {
                println!("{}", key);
            }
            Ok(())
        }
    };
    match printed {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "failed to render output");
            ExitCode::FAILURE
        }
    }
}
