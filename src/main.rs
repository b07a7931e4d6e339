// cppdecl: structural declaration extractor for C++ headers

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use cppdecl::ast::Declaration;

#[derive(Parser)]
#[command(name = "cppdecl", version, about = "Extract structural declarations from a C++ header as JSON")]
struct Cli {
    /// Header file to parse
    file: PathBuf,

    /// Emit class declarations
    #[arg(short = 'c', long)]
    classes: bool,

    /// Emit enum declarations
    #[arg(short = 'e', long)]
    enums: bool,

    /// Emit function declarations
    #[arg(short = 'f', long)]
    functions: bool,

    /// Emit property declarations
    #[arg(short = 'p', long)]
    properties: bool,

    /// Line number to report for the first input line
    #[arg(long, default_value_t = 1)]
    starting_line: usize,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

/// Which declaration kinds to keep. No filter flags at all means keep
/// everything.
struct Filter {
    classes: bool,
    enums: bool,
    functions: bool,
    properties: bool,
}

impl Filter {
    fn from_cli(cli: &Cli) -> Option<Filter> {
        if !(cli.classes || cli.enums || cli.functions || cli.properties) {
            return None;
        }
        Some(Filter {
            classes: cli.classes,
            enums: cli.enums,
            functions: cli.functions,
            properties: cli.properties,
        })
    }

    fn retain(&self, declarations: Vec<Declaration>) -> Vec<Declaration> {
        declarations
            .into_iter()
            .filter_map(|declaration| self.keep(declaration))
            .collect()
    }

    /// Namespaces and classes are containers: their members are filtered
    /// recursively and the container survives if anything inside did (or,
    /// for classes, if classes themselves were requested).
    fn keep(&self, declaration: Declaration) -> Option<Declaration> {
        match declaration {
            Declaration::Namespace(mut ns) => {
                ns.members = self.retain(ns.members);
                if ns.members.is_empty() {
                    None
                } else {
                    Some(Declaration::Namespace(ns))
                }
            }
            Declaration::Class(mut class) => {
                class.members = self.retain(class.members);
                if self.classes || !class.members.is_empty() {
                    Some(Declaration::Class(class))
                } else {
                    None
                }
            }
            Declaration::Enum(e) => self.enums.then(|| Declaration::Enum(e)),
            Declaration::Function(f) => self.functions.then(|| Declaration::Function(f)),
            Declaration::Property(p) => self.properties.then(|| Declaration::Property(p)),
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let source = match fs::read(&cli.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", cli.file.display(), e);
            process::exit(1);
        }
    };

    let mut parser = cppdecl::parser::Parser::with_starting_line(&source, cli.starting_line);
    let mut declarations = match parser.parse_all() {
        Ok(declarations) => declarations,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            process::exit(1);
        }
    };

    if let Some(filter) = Filter::from_cli(&cli) {
        declarations = filter.retain(declarations);
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&declarations)
    } else {
        serde_json::to_string(&declarations)
    };
    match json {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: cannot serialize output: {}", e);
            process::exit(1);
        }
    }
}
