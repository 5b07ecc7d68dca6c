use std::path::PathBuf;

use clap::Parser;

use pascallite_parser::options::{ParseOptions, DEFAULT_MAX_IDENTIFIER_LENGTH};
use pascallitec::cli;
use pascallitec::logger;

#[derive(Parser, Debug)]
#[command(name = "pascallitec", about = "PascalLite compiler")]
struct Args {
    /// Turn on verbose logging. Repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write log messages to the file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Identifiers longer than this produce a diagnostic.
    #[arg(long, default_value_t = DEFAULT_MAX_IDENTIFIER_LENGTH)]
    max_identifier_length: usize,

    /// Treat an identifier that is too long as an error.
    #[arg(long)]
    long_identifier_error: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(clap::Subcommand, Debug)]
enum Action {
    /// Check the syntax and the declarations of files or directories.
    Check { files: Vec<PathBuf> },
    /// Print the tokens of a file.
    Tokenize { file: PathBuf },
    /// Print the syntax tree of a file as JSON.
    Ast {
        file: PathBuf,
        /// Also check the declarations and uses of variables.
        #[arg(long)]
        resolve: bool,
    },
    /// Compile a file into MEPA instructions.
    Compile {
        file: PathBuf,
        /// Write the instructions to the file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the symbol table after the instructions.
        #[arg(long)]
        symbols: bool,
    },
}

pub fn main() -> Result<(), String> {
    let args = Args::parse();

    logger::configure(args.verbose, args.log_file)?;

    let parse = ParseOptions {
        max_identifier_length: args.max_identifier_length,
        long_identifier_is_error: args.long_identifier_error,
    };

    match args.action {
        Action::Check { files } => cli::check(files, &parse, false),
        Action::Tokenize { file } => cli::tokenize(&file, &parse, false),
        Action::Ast { file, resolve } => cli::ast(&file, resolve, &parse, false),
        Action::Compile {
            file,
            output,
            symbols,
        } => cli::compile(&file, output, symbols, &parse, false),
    }
}
